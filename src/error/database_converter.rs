use crate::error::AppError;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Name of the unique constraint guarding `users.email`.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Utility for converting database errors to structured AppError variants.
///
/// Unique violations on the e-mail column become the same business error the
/// service raises, so a concurrent duplicate insert reads exactly like a
/// sequential one.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        match kind {
            DatabaseErrorKind::UniqueViolation if Self::is_email_violation(info) => {
                AppError::DuplicateEmail
            }
            DatabaseErrorKind::UniqueViolation => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!(
                    "Unique constraint violation: {}",
                    info.message()
                )),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("{:?}: {}", other, info.message())),
            },
        }
    }

    /// Postgres reports the constraint name; other sources may only carry
    /// the column or the raw message.
    fn is_email_violation(info: &(dyn DatabaseErrorInformation + Send + Sync)) -> bool {
        info.constraint_name() == Some(EMAIL_UNIQUE_CONSTRAINT)
            || info.column_name() == Some("email")
            || info.message().contains(EMAIL_UNIQUE_CONSTRAINT)
    }
}
