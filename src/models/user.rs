use diesel::prelude::*;

/// User entity as seen by the service and HTTP layers.
///
/// `id` is `None` until the record has been saved once; storage assigns it
/// and it never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: i32,
    pub cellphone: String,
}

/// Row read back from the users table.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: i32,
    pub cellphone: String,
}

/// Column values written on insert and on full overwrite.
///
/// Every column except `id` is set, so the same struct serves both INSERT
/// and UPDATE.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChanges<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: i32,
    pub cellphone: &'a str,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            email: row.email,
            password: row.password,
            role: row.role,
            cellphone: row.cellphone,
        }
    }
}

impl<'a> From<&'a User> for UserChanges<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            name: &user.name,
            email: &user.email,
            password: &user.password,
            role: user.role,
            cellphone: &user.cellphone,
        }
    }
}
