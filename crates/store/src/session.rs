//! Session lookup.
//!
//! Sign-in and token issuance belong to the hosted auth provider; the
//! storefront only resolves an opaque bearer token to a session.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::Result;

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session that never expires.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            expires_at: None,
        }
    }

    /// Sets the expiry time.
    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// Returns true if the session has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Trait for resolving bearer tokens to sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Looks up a token. Returns None if the token is unknown.
    async fn lookup(&self, token: &str) -> Result<Option<Session>>;
}

/// In-memory session store for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    /// Creates an empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session under a token.
    pub async fn insert(&self, token: impl Into<String>, session: Session) {
        self.sessions.write().await.insert(token.into(), session);
    }

    /// Removes a token.
    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn lookup(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }
}
