mod app_error;
mod database_converter;

pub use app_error::{AppError, AppResult, DUPLICATE_EMAIL_MESSAGE, ValidationFieldError};
pub use database_converter::{DatabaseErrorConverter, EMAIL_UNIQUE_CONSTRAINT};
