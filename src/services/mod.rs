//! Service layer for business logic operations.
//!
//! Services encapsulate business rules and coordinate between the store and
//! handlers.

mod user_service;

pub use user_service::UserService;

use std::sync::Arc;

use crate::repositories::UserStore;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the store sits behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
}

impl Services {
    /// Creates a new Services instance over the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserService::new(store),
        }
    }
}
