//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User request/response body and search parameters
//! - `error` - Error response body
//! - `pagination` - Page envelope
//! - `health` - Health check responses

mod error;
mod health;
mod pagination;
mod user;

pub use error::ApiErrors;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::{PageResponse, PageableResponse};
pub use user::{UserDto, UserSearchParams};
