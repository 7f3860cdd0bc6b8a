//! Example-style search criteria for users.

use crate::models::User;

/// Partial-match criteria built from whichever user fields were supplied.
///
/// String criteria match by case-insensitive substring, numeric ones by
/// equality. Absent or empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<i32>,
    pub cellphone: Option<String>,
}

impl UserFilter {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn password(&self) -> Option<&str> {
        non_empty(&self.password)
    }

    pub fn cellphone(&self) -> Option<&str> {
        non_empty(&self.cellphone)
    }

    /// Evaluates the criteria against a single user.
    pub fn matches(&self, user: &User) -> bool {
        self.id.is_none_or(|id| user.id == Some(id))
            && self.role.is_none_or(|role| user.role == role)
            && contains_ignore_case(&user.name, self.name())
            && contains_ignore_case(&user.email, self.email())
            && contains_ignore_case(&user.password, self.password())
            && contains_ignore_case(&user.cellphone, self.cellphone())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}
