//! Page envelope returned by search endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Page;

/// One page of results with its paging metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Items on this page
    pub content: Vec<T>,
    /// Matches across all pages
    #[schema(example = 1)]
    pub total_elements: u64,
    #[schema(example = 1)]
    pub total_pages: u64,
    /// Zero-based page number
    #[schema(example = 0)]
    pub number: u32,
    /// Requested page size
    #[schema(example = 20)]
    pub size: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
    pub pageable: PageableResponse,
}

/// The window that produced a page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageableResponse {
    pub page_number: u32,
    pub page_size: u32,
    pub offset: u64,
}

impl<T, U> From<Page<U>> for PageResponse<T>
where
    T: From<U>,
{
    fn from(page: Page<U>) -> Self {
        let total_pages = page.total_pages();
        let first = page.is_first();
        let last = page.is_last();
        let Page {
            items: content,
            total,
            request,
        } = page.map(T::from);

        Self {
            total_elements: total,
            total_pages,
            number: request.page,
            size: request.size,
            number_of_elements: content.len(),
            first,
            last,
            empty: content.is_empty(),
            pageable: PageableResponse {
                page_number: request.page,
                page_size: request.size,
                offset: request.offset(),
            },
            content,
        }
    }
}
