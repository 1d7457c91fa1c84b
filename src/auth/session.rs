//! # Session Management
//!
//! In-memory sessions for the admin panel. The client holds an opaque
//! random token; the registry stores only its SHA-256 hash together with an
//! expiry. Sessions do not survive a restart, which is acceptable for a
//! single-admin site.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::crypto::{generate_token, hash_token};
use super::errors::{AuthError, AuthResult};

/// Default session lifetime, matching the admin panel's 24-hour window
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// An authenticated admin session
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Unique session identifier
    pub id: Uuid,

    /// Identity the session belongs to
    pub email: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is past its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Registry of live sessions, keyed by hashed token
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionRegistry {
    /// Create a registry with the given session lifetime
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a session and return the raw token to hand to the client
    pub fn create(&self, email: &str) -> AuthResult<(String, Session)> {
        let token = generate_token();
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::Storage("session lock poisoned".to_string()))?;
        sessions.insert(hash_token(&token), session.clone());

        Ok((token, session))
    }

    /// Validate a raw token, returning its session
    ///
    /// Expired sessions are removed on the spot and reported as invalid.
    pub fn validate(&self, token: &str) -> AuthResult<Session> {
        let key = hash_token(token);
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::Storage("session lock poisoned".to_string()))?;

        match sessions.get(&key) {
            Some(session) if session.is_expired() => {
                sessions.remove(&key);
                Err(AuthError::SessionInvalid)
            }
            Some(session) => Ok(session.clone()),
            None => Err(AuthError::SessionInvalid),
        }
    }

    /// Whether a raw token maps to a live session
    pub fn is_authenticated(&self, token: &str) -> bool {
        self.validate(token).is_ok()
    }

    /// Revoke a session immediately
    pub fn revoke(&self, token: &str) -> AuthResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::Storage("session lock poisoned".to_string()))?;
        sessions.remove(&hash_token(token));
        Ok(())
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(Duration::hours(DEFAULT_SESSION_TTL_HOURS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_validate() {
        let registry = SessionRegistry::default();
        let (token, session) = registry.create("admin@example.com").unwrap();

        let validated = registry.validate(&token).unwrap();
        assert_eq!(validated.id, session.id);
        assert_eq!(validated.email, "admin@example.com");
    }

    #[test]
    fn test_unknown_token_invalid() {
        let registry = SessionRegistry::default();
        assert!(!registry.is_authenticated("made-up-token"));
    }

    #[test]
    fn test_revoke_invalidates_immediately() {
        let registry = SessionRegistry::default();
        let (token, _) = registry.create("admin@example.com").unwrap();

        registry.revoke(&token).unwrap();
        assert!(matches!(
            registry.validate(&token),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_expired_session_removed() {
        let registry = SessionRegistry::new(Duration::hours(-1));
        let (token, _) = registry.create("admin@example.com").unwrap();

        assert!(matches!(
            registry.validate(&token),
            Err(AuthError::SessionInvalid)
        ));
    }
}
