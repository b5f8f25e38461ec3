//! Access guard for FOLIO: the user directory, session wiring, and the
//! [`CurrentUser`] extractor that resolves a request credential to an
//! identity before any handler runs.

pub mod guard;

pub use guard::CurrentUser;

use std::sync::Arc;

use sha2::{Digest, Sha256};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use folio_kernel::settings::AuthSettings;
use folio_store::{Collection, Document, SessionStore};

/// A registered identity.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_digest: String,
    pub created_at: OffsetDateTime,
}

impl Document for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// Shared guard state: the user directory and live sessions.
///
/// Cloning is cheap; all fields are behind `Arc`.
#[derive(Clone)]
pub struct AuthContext {
    pub users: Arc<Collection<User>>,
    pub sessions: Arc<SessionStore>,
    pub cookie_name: Arc<str>,
}

impl AuthContext {
    pub fn new(settings: &AuthSettings) -> Self {
        let users = Collection::new("users")
            .with_unique_index("username", |user: &User| user.username.clone())
            .with_unique_index("email", |user: &User| user.email.clone());

        let ttl = Duration::minutes(settings.session_ttl_minutes as i64);

        Self {
            users: Arc::new(users),
            sessions: Arc::new(SessionStore::new(ttl)),
            cookie_name: Arc::from(settings.session_cookie.as_str()),
        }
    }

    /// SHA-256 digest over `{username}:{password}`, hex-encoded. Salting with
    /// the username keeps equal passwords from sharing a digest.
    pub fn digest(username: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(username.as_bytes());
        hasher.update(b":");
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Resolve a session token to its user, if the session is live and the
    /// user still exists.
    pub fn resolve_token(&self, token: &str) -> Option<User> {
        let user_id = self.sessions.resolve(token)?;
        self.users.get(user_id)
    }
}
