//! Session registry: opaque bearer tokens for authenticated principals
//!
//! Authentication issues a uuid-v4 token mapped to the user it represents.
//! Tokens are process-local (no signing, no persistence); the registry is
//! the single place the external interface turns a token back into a user.

use crate::types::{LedgerError, SessionId, UserId};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// An authenticated principal
#[derive(Debug, Clone)]
pub struct Session {
    /// The user this session represents
    pub user: UserId,

    /// When the session was issued
    pub issued_at: DateTime<Utc>,
}

/// Issues and resolves session tokens
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Session>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        SessionRegistry {
            sessions: DashMap::new(),
        }
    }

    /// Issue a fresh session token for a user
    pub fn issue(&self, user: UserId) -> SessionId {
        let token = Uuid::new_v4();
        self.sessions.insert(
            token,
            Session {
                user,
                issued_at: Utc::now(),
            },
        );
        token
    }

    /// Resolve a session token to its user
    ///
    /// # Errors
    ///
    /// Returns `InvalidSession` for unknown tokens.
    pub fn resolve(&self, session: SessionId) -> Result<UserId, LedgerError> {
        self.sessions
            .get(&session)
            .map(|entry| entry.user)
            .ok_or(LedgerError::InvalidSession)
    }
}
