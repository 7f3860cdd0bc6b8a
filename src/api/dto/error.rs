//! Error response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationFieldError;

/// Error body returned for every rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "errors": ["E-mail já cadastrado."] }))]
pub struct ApiErrors {
    pub errors: Vec<String>,
}

impl ApiErrors {
    /// Body carrying a single message.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    /// One message per rejected field, in the order given.
    pub fn from_field_errors(errors: &[ValidationFieldError]) -> Self {
        Self {
            errors: errors.iter().map(|e| e.message.clone()).collect(),
        }
    }
}
