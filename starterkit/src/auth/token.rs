//! Session token types

use serde::{Deserialize, Serialize};

/// The signed-in user, as returned alongside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

impl UserInfo {
    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn default_token_type() -> String {
    "bearer".into()
}

/// A user token as issued by the backend.
///
/// `token_parsed` holds the decoded claims; they are carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub token_parsed: serde_json::Value,
    pub user: UserInfo,
}

impl UserToken {
    /// Creates a bearer token for `user`.
    pub fn new(access_token: impl Into<String>, user: UserInfo) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            token_parsed: serde_json::Value::Null,
            user,
        }
    }

    /// Returns the token as an authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}
