//! In-process user store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{Page, PageRequest, User, UserFilter};
use crate::repositories::UserStore;

/// Users kept in a `BTreeMap` keyed by id, so iteration is already in
/// ascending id order.
///
/// Ids start at 1 and are never reused. E-mail uniqueness is checked under
/// the write lock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

impl State {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && u.id != except)
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.state.read().await.email_taken(email, None))
    }

    async fn save(&self, mut user: User) -> AppResult<User> {
        let mut state = self.state.write().await;

        let id = match user.id {
            None => {
                if state.email_taken(&user.email, None) {
                    return Err(AppError::DuplicateEmail);
                }
                state.last_id += 1;
                user.id = Some(state.last_id);
                state.last_id
            }
            Some(id) => {
                if !state.users.contains_key(&id) {
                    return Err(AppError::user_not_found(id));
                }
                if state.email_taken(&user.email, Some(id)) {
                    return Err(AppError::DuplicateEmail);
                }
                id
            }
        };

        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        if let Some(id) = user.id {
            self.state.write().await.users.remove(&id);
        }
        Ok(())
    }

    async fn find_filtered(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> AppResult<Page<User>> {
        let state = self.state.read().await;

        let matching: Vec<&User> = state.users.values().filter(|u| filter.matches(u)).collect();
        let total = matching.len() as u64;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);

        let items = matching
            .into_iter()
            .skip(skip)
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, total, page))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
