//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::repositories::UserStore;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since everything inside sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the store, used by health checks
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    /// Wires the services over the given store.
    ///
    /// # Example
    /// ```ignore
    /// let store = create_user_store(&settings).await?;
    /// let state = AppState::new(store);
    /// ```
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            services: Services::new(store.clone()),
            store,
        }
    }
}
