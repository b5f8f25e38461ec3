use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_authz::User;

/// Request body for account creation.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Public projection of an identity; never carries the password digest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProjection {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserProjection {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: UserProjection,
}
