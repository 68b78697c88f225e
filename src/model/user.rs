use crate::model::nullable;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The signed-in account, as persisted under the `currentUser` key.
///
/// `roles` is a single role name such as `"Client"` or `"Manager"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: Option<i64>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub username: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub names: String,
    #[serde(deserialize_with = "single_role")]
    pub roles: String,
}

/// Reads `roles` as one role name. Some backends send a list; the first entry wins.
fn single_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Roles {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Roles>::deserialize(deserializer)? {
        Some(Roles::One(role)) => role,
        Some(Roles::Many(roles)) => roles.into_iter().next().unwrap_or_default(),
        None => String::new(),
    })
}

/// Sign-in payload.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Passwords never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Sign-up payload.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignUp {
    pub username: String,
    pub password: String,
    pub names: String,
    pub roles: String,
}

impl fmt::Debug for SignUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUp")
            .field("username", &self.username)
            .field("password", &"***")
            .field("names", &self.names)
            .field("roles", &self.roles)
            .finish()
    }
}

/// Answer of `GET /users/{id}/role`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleInfo {
    pub user_id: Option<i64>,
    pub role: String,
}
