//! Signed-in user

use serde::{Deserialize, Serialize};

/// How the session was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignInMethod {
    Password,
    Federated,
}

/// Session principal as seen by the frontend
///
/// Provider tokens stay in the backend and are not part of this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub method: SignInMethod,
    /// Unix seconds
    pub signed_in_at: i64,
}

impl User {
    pub fn new(uid: impl Into<String>, email: Option<String>, method: SignInMethod) -> Self {
        Self {
            uid: uid.into(),
            email,
            display_name: None,
            method,
            signed_in_at: chrono::Utc::now().timestamp(),
        }
    }
}
