//! Opaque session tokens with TTL expiry.

use std::collections::HashMap;
use std::sync::RwLock;

use time::{Duration, OffsetDateTime};
use uuid::Uuid;

struct Session {
    user_id: Uuid,
    expires_at: OffsetDateTime,
}

/// Token → identity mapping backing the access guard.
///
/// Tokens are random v4 UUIDs; they carry no claims, so revocation is
/// immediate and expiry is checked on every resolve.
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session for `user_id` and return the opaque token.
    pub fn open(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            user_id,
            expires_at: OffsetDateTime::now_utc() + self.ttl,
        };

        self.sessions
            .write()
            .expect("session lock poisoned")
            .insert(token.clone(), session);
        tracing::debug!(%user_id, "session opened");
        token
    }

    /// Resolve a token to its user id. Expired tokens are pruned on access.
    pub fn resolve(&self, token: &str) -> Option<Uuid> {
        let mut sessions = self.sessions.write().expect("session lock poisoned");

        match sessions.get(token) {
            Some(session) if session.expires_at > OffsetDateTime::now_utc() => {
                Some(session.user_id)
            }
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Drop a session; returns whether the token existed.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions
            .write()
            .expect("session lock poisoned")
            .remove(token)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_resolve_revoke_cycle() {
        let store = SessionStore::new(Duration::minutes(30));
        let user_id = Uuid::new_v4();

        let token = store.open(user_id);
        assert_eq!(store.resolve(&token), Some(user_id));

        assert!(store.revoke(&token));
        assert_eq!(store.resolve(&token), None);
        assert!(!store.revoke(&token));
    }

    #[test]
    fn expired_sessions_do_not_resolve() {
        let store = SessionStore::new(Duration::minutes(-1));
        let token = store.open(Uuid::new_v4());
        assert_eq!(store.resolve(&token), None);
    }

    #[test]
    fn unknown_token_does_not_resolve() {
        let store = SessionStore::new(Duration::minutes(30));
        assert_eq!(store.resolve("no-such-token"), None);
    }
}
