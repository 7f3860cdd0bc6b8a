//! Repository layer for user persistence.
//!
//! `UserStore` is the seam between the service and storage. Two backends
//! implement it: PostgreSQL through diesel_async and an in-process map.

mod memory_user_repo;
mod user_repo;

pub use memory_user_repo::InMemoryUserRepository;
pub use user_repo::PgUserRepository;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::settings::{Settings, StorageBackend};
use crate::db;
use crate::error::AppResult;
use crate::models::{Page, PageRequest, User, UserFilter};

/// Storage operations for users.
///
/// All backends must implement this trait to provide a unified interface.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks a user up by id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Exact, case-sensitive e-mail existence check.
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Inserts `user` when it has no id, otherwise overwrites every column
    /// of the matching record.
    ///
    /// Overwriting a record that does not exist fails with `NotFound`.
    async fn save(&self, user: User) -> AppResult<User>;

    /// Removes the record matching `user.id`. Missing records are ignored.
    async fn delete(&self, user: &User) -> AppResult<()>;

    /// One page of users matching `filter`, in ascending id order.
    async fn find_filtered(&self, filter: &UserFilter, page: PageRequest)
    -> AppResult<Page<User>>;

    /// Connectivity probe for readiness checks.
    async fn ping(&self) -> AppResult<()>;
}

/// Builds the store selected by `storage.backend`.
///
/// The postgres backend runs pending migrations first when
/// `database.auto_migrate` is set.
pub async fn create_user_store(settings: &Settings) -> AppResult<Arc<dyn UserStore>> {
    let store: Arc<dyn UserStore> = match settings.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory user store");
            Arc::new(InMemoryUserRepository::new())
        }
        StorageBackend::Postgres => {
            if settings.database.auto_migrate {
                let applied = db::run_migrations(&settings.database.url).await?;
                tracing::info!(count = applied.len(), "Applied pending migrations");
            }
            let pool = db::establish_async_connection_pool(&settings.database).await?;
            tracing::info!("Using PostgreSQL user store");
            Arc::new(PgUserRepository::new(pool))
        }
    };

    Ok(store)
}
