//! PostgreSQL user repository.
//!
//! Provides the `UserStore` operations for the users table using diesel_async.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Page, PageRequest, User, UserChanges, UserFilter, UserRow};
use crate::repositories::UserStore;
use crate::schema::users;

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: AsyncDbPool,
}

impl PgUserRepository {
    /// Creates a new PgUserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, user: &User) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        let row = diesel::insert_into(users::table)
            .values(UserChanges::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))?;

        Ok(row.into())
    }

    async fn overwrite(&self, user_id: i64, user: &User) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        let row = diesel::update(users::table.find(user_id))
            .set(UserChanges::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update user"))?;

        row.map(User::from)
            .ok_or_else(|| AppError::user_not_found(user_id))
    }
}

/// Turns a criterion into an ILIKE pattern matching it as a literal substring.
pub(crate) fn like_pattern(criterion: &str) -> String {
    let mut pattern = String::with_capacity(criterion.len() + 2);
    pattern.push('%');
    for c in criterion.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn filtered_query(filter: &UserFilter) -> users::BoxedQuery<'static, Pg> {
    let mut query = users::table.into_boxed();

    if let Some(user_id) = filter.id {
        query = query.filter(users::id.eq(user_id));
    }
    if let Some(role) = filter.role {
        query = query.filter(users::role.eq(role));
    }
    if let Some(name) = filter.name() {
        query = query.filter(users::name.ilike(like_pattern(name)));
    }
    if let Some(email) = filter.email() {
        query = query.filter(users::email.ilike(like_pattern(email)));
    }
    if let Some(password) = filter.password() {
        query = query.filter(users::password.ilike(like_pattern(password)));
    }
    if let Some(cellphone) = filter.cellphone() {
        query = query.filter(users::cellphone.ilike(like_pattern(cellphone)));
    }

    query
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        let row = users::table
            .find(user_id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find user"))?;

        Ok(row.map(User::from))
    }

    async fn exists_by_email(&self, user_email: &str) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(user_email)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "check user email"))
    }

    async fn save(&self, user: User) -> AppResult<User> {
        match user.id {
            None => self.insert(&user).await,
            Some(user_id) => self.overwrite(user_id, &user).await,
        }
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        let Some(user_id) = user.id else {
            return Ok(());
        };
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(users::table.find(user_id))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete user"))?;

        tracing::debug!(user_id, affected, "Deleted user rows");
        Ok(())
    }

    async fn find_filtered(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> AppResult<Page<User>> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<UserRow> = filtered_query(filter)
            .select(UserRow::as_select())
            .order(users::id.asc())
            .offset(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .limit(i64::from(page.limit()))
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "search users"))?;

        let total: i64 = filtered_query(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "count users"))?;

        Ok(Page::new(
            rows.into_iter().map(User::from).collect(),
            u64::try_from(total).unwrap_or_default(),
            page,
        ))
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "ping"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    #[test]
    fn test_like_pattern_wraps_in_wildcards() {
        assert_eq!(like_pattern("Jhon"), "%Jhon%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\tmp"), "%c:\\\\tmp%");
    }

    #[test]
    fn test_empty_filter_has_no_where_clause() {
        let query = filtered_query(&UserFilter::default());
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_filter_builds_ilike_and_equality() {
        let filter = UserFilter {
            name: Some("Jhon".to_string()),
            role: Some(1),
            email: Some(String::new()),
            ..Default::default()
        };
        let query = filtered_query(&filter);
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains("\"users\".\"name\" ILIKE"));
        assert!(sql.contains("\"users\".\"role\" ="));
        assert!(!sql.contains("\"users\".\"email\" ILIKE"));
        assert!(sql.contains("%Jhon%"));
    }
}
