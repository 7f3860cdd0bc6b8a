//! User service for business logic operations.
//!
//! Enforces e-mail uniqueness on create and the id guards on update and
//! delete, then delegates to the configured `UserStore`.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Page, PageRequest, User, UserFilter};
use crate::repositories::UserStore;

/// User service for handling user-related business logic.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new UserService over the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Registers a new user.
    ///
    /// # Errors
    /// `DuplicateEmail` if another user already has this e-mail. The check
    /// and the insert are separate calls; a concurrent duplicate is caught
    /// by the store and reported the same way.
    pub async fn create(&self, user: User) -> AppResult<User> {
        if self.store.exists_by_email(&user.email).await? {
            tracing::warn!(email = %user.email, "Rejected user with duplicate e-mail");
            return Err(AppError::DuplicateEmail);
        }

        let created = self.store.save(user).await?;
        tracing::info!(user_id = ?created.id, "User created");
        Ok(created)
    }

    /// Gets a user by id. Absence is not an error.
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.store.find_by_id(id).await
    }

    /// Deletes the user without re-checking that it exists.
    ///
    /// # Errors
    /// `InvalidArgument` if the user has no id.
    pub async fn delete(&self, user: &User) -> AppResult<()> {
        let Some(id) = user.id else {
            tracing::error!("Delete called for a user without id");
            return Err(AppError::missing_user_id());
        };

        self.store.delete(user).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Overwrites every field of the stored user except the id.
    ///
    /// # Errors
    /// `InvalidArgument` if the user has no id, `NotFound` if no user has it.
    pub async fn update(&self, user: User) -> AppResult<User> {
        let Some(id) = user.id else {
            tracing::error!("Update called for a user without id");
            return Err(AppError::missing_user_id());
        };

        let updated = self.store.save(user).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(updated)
    }

    /// Searches users by example. An empty page is not an error.
    pub async fn find(&self, filter: &UserFilter, page: PageRequest) -> AppResult<Page<User>> {
        tracing::debug!(?filter, page = page.page, size = page.size, "Searching users");
        self.store.find_filtered(filter, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryUserRepository;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn jhon() -> User {
        User {
            id: None,
            name: "Jhon Dole".to_string(),
            email: "jhon@dole.com".to_string(),
            password: "123456789".to_string(),
            role: 1,
            cellphone: "99999999999".to_string(),
        }
    }

    /// Store that reports every e-mail as free and records calls.
    #[derive(Default)]
    struct RecordingStore {
        saved: Mutex<Vec<User>>,
        deleted: Mutex<Vec<Option<i64>>>,
    }

    #[async_trait]
    impl UserStore for RecordingStore {
        async fn find_by_id(&self, _id: i64) -> AppResult<Option<User>> {
            Ok(None)
        }

        async fn exists_by_email(&self, _email: &str) -> AppResult<bool> {
            Ok(false)
        }

        async fn save(&self, mut user: User) -> AppResult<User> {
            user.id.get_or_insert(100);
            self.saved.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn delete(&self, user: &User) -> AppResult<()> {
            self.deleted.lock().unwrap().push(user.id);
            Ok(())
        }

        async fn find_filtered(
            &self,
            _filter: &UserFilter,
            page: PageRequest,
        ) -> AppResult<Page<User>> {
            Ok(Page::new(Vec::new(), 0, page))
        }

        async fn ping(&self) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let created = service().create(jhon()).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.email, "jhon@dole.com");
    }

    #[tokio::test]
    async fn test_create_duplicate_email_fails() {
        let service = service();
        service.create(jhon()).await.unwrap();

        let err = service.create(jhon()).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));
        assert_eq!(err.to_string(), "E-mail já cadastrado.");
    }

    #[tokio::test]
    async fn test_create_race_surfaces_as_duplicate_email() {
        // The store-level check catches what exists_by_email let through.
        let store = Arc::new(InMemoryUserRepository::new());
        store.save(jhon()).await.unwrap();

        struct BlindStore(Arc<InMemoryUserRepository>);

        #[async_trait]
        impl UserStore for BlindStore {
            async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
                self.0.find_by_id(id).await
            }
            async fn exists_by_email(&self, _email: &str) -> AppResult<bool> {
                Ok(false)
            }
            async fn save(&self, user: User) -> AppResult<User> {
                self.0.save(user).await
            }
            async fn delete(&self, user: &User) -> AppResult<()> {
                self.0.delete(user).await
            }
            async fn find_filtered(
                &self,
                filter: &UserFilter,
                page: PageRequest,
            ) -> AppResult<Page<User>> {
                self.0.find_filtered(filter, page).await
            }
            async fn ping(&self) -> AppResult<()> {
                Ok(())
            }
        }

        let service = UserService::new(Arc::new(BlindStore(store)));
        let err = service.create(jhon()).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_get_by_id_is_idempotent() {
        let service = service();
        let created = service.create(jhon()).await.unwrap();
        let id = created.id.unwrap();

        let first = service.get_by_id(id).await.unwrap();
        let second = service.get_by_id(id).await.unwrap();

        assert_eq!(first, Some(created));
        assert_eq!(first, second);
        assert!(service.get_by_id(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_without_id_is_invalid_argument() {
        let store = Arc::new(RecordingStore::default());
        let service = UserService::new(store.clone());

        let err = service.delete(&jhon()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument { .. }));
        assert!(err.to_string().contains("User id can't be null"));
        assert!(store.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_user() {
        let service = service();
        let created = service.create(jhon()).await.unwrap();

        service.delete(&created).await.unwrap();
        assert!(service.get_by_id(created.id.unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_does_not_check_existence() {
        let store = Arc::new(RecordingStore::default());
        let service = UserService::new(store.clone());
        let mut ghost = jhon();
        ghost.id = Some(5);

        service.delete(&ghost).await.unwrap();
        assert_eq!(*store.deleted.lock().unwrap(), vec![Some(5)]);
    }

    #[tokio::test]
    async fn test_update_without_id_is_invalid_argument() {
        let store = Arc::new(RecordingStore::default());
        let service = UserService::new(store.clone());

        let err = service.update(jhon()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument { .. }));
        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_and_keeps_id() {
        let service = service();
        let mut user = service.create(jhon()).await.unwrap();
        let id = user.id;

        user.name = "Jhon Updated".to_string();
        user.role = 2;
        let updated = service.update(user).await.unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "Jhon Updated");
        assert_eq!(service.get_by_id(id.unwrap()).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_of_missing_id_is_not_found() {
        let mut ghost = jhon();
        ghost.id = Some(77);

        let err = service().update(ghost).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_returns_matches_and_empty_pages() {
        let service = service();
        service.create(jhon()).await.unwrap();

        let filter = UserFilter {
            name: Some("Jhon Dole".to_string()),
            email: Some("jhon@dole.com".to_string()),
            ..Default::default()
        };
        let page = service.find(&filter, PageRequest::new(0, 100)).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 1);

        let none = UserFilter {
            name: Some("nobody".to_string()),
            ..Default::default()
        };
        let empty = service.find(&none, PageRequest::default()).await.unwrap();
        assert!(empty.items.is_empty());
        assert_eq!(empty.total, 0);
    }
}
