//! User-facing account types.

use serde::{Deserialize, Serialize};

use career_closet_core::UserId;

/// Full user record as returned by `GET /user/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Free-form per-user settings blob; the client passes it through.
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
}

/// The auth token record persisted across runs.
///
/// Written on login, erased on logout or failed session restore. The user
/// ID doubles as the bearer credential against the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAuth {
    pub email: String,
    pub user_id: UserId,
    pub user_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}
