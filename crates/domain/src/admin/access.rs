//! Server-side admin allow-list.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use store::Session;
use thiserror::Error;

/// Why a request was refused admin access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No session, an unknown token or an expired session.
    #[error("Authentication required")]
    Unauthenticated,

    /// The session is valid but its email is not on the allow-list.
    #[error("{0} is not an admin")]
    Forbidden(String),
}

/// The set of emails allowed to use admin operations.
///
/// Emails are compared case-insensitively. An empty policy admits nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminPolicy {
    emails: BTreeSet<String>,
}

impl AdminPolicy {
    pub fn new<I, E>(emails: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Parses a comma separated list of emails.
    pub fn from_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Returns true if `email` is allow-listed.
    pub fn allows(&self, email: &str) -> bool {
        self.emails.contains(&email.trim().to_lowercase())
    }

    /// Checks a resolved session at time `now`.
    pub fn authorize(
        &self,
        session: Option<Session>,
        now: DateTime<Utc>,
    ) -> Result<Session, AccessError> {
        let session = session
            .filter(|s| !s.is_expired(now))
            .ok_or(AccessError::Unauthenticated)?;
        if !self.allows(&session.email) {
            return Err(AccessError::Forbidden(session.email));
        }
        Ok(session)
    }
}
