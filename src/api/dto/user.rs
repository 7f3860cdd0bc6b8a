//! User-related DTOs for API requests and responses.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, User, UserFilter};

/// Wire shape of a user, used for request and response bodies.
///
/// String fields are optional on the way in so that a missing field is
/// reported by validation instead of failing deserialization. `role`
/// defaults to `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
#[schema(example = json!({
    "id": 1,
    "name": "Jhon Dole",
    "email": "jhon@dole.com",
    "password": "123456789",
    "role": 1,
    "cellphone": "99999999999"
}))]
pub struct UserDto {
    pub id: Option<i64>,
    #[validate(
        required(message = "name must not be empty"),
        length(min = 1, message = "name must not be empty")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "email must not be empty"),
        length(min = 1, message = "email must not be empty")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "password must not be empty"),
        length(min = 1, message = "password must not be empty")
    )]
    pub password: Option<String>,
    pub role: i32,
    #[validate(
        required(message = "cellphone must not be empty"),
        length(min = 1, message = "cellphone must not be empty")
    )]
    pub cellphone: Option<String>,
}

impl UserDto {
    /// Converts the body into an entity, keeping whatever id it carries.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            role: self.role,
            cellphone: self.cellphone.unwrap_or_default(),
        }
    }

    /// Overwrites every field of `user` except the id.
    pub fn apply_to(self, user: &mut User) {
        user.name = self.name.unwrap_or_default();
        user.email = self.email.unwrap_or_default();
        user.password = self.password.unwrap_or_default();
        user.role = self.role;
        user.cellphone = self.cellphone.unwrap_or_default();
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: Some(user.name),
            email: Some(user.email),
            password: Some(user.password),
            role: user.role,
            cellphone: Some(user.cellphone),
        }
    }
}

/// Query parameters of the user search endpoint.
///
/// Every user field is an optional criterion; an empty value (`id=`) is the
/// same as leaving it out. `page` is zero-based.
#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct UserSearchParams {
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub id: Option<i64>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the e-mail
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub role: Option<i32>,
    pub cellphone: Option<String>,

    /// Page number (0-based)
    #[serde(default)]
    #[param(minimum = 0, example = 0)]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = MAX_PAGE_SIZE, message = "size must be between 1 and 2000"))]
    #[param(minimum = 1, maximum = 2000, example = 20)]
    pub size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Query values arrive as text; blank means no criterion.
fn deserialize_optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}

impl UserSearchParams {
    pub fn filter(&self) -> UserFilter {
        UserFilter {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role,
            cellphone: self.cellphone.clone(),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}
