//! Time-bounded session value object.
//!
//! The session is an explicit value passed to whoever needs it rather than
//! an ambient authenticated flag; expiry is checked on read, never cached.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated session for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    /// Time-to-live in seconds.
    pub ttl_secs: i64,
}

impl Session {
    /// Issue a session for `subject` valid for `ttl_secs` from now.
    pub fn issue(subject: impl Into<String>, ttl_secs: i64) -> Self {
        Self::issued_at(subject, Utc::now(), ttl_secs)
    }

    /// Issue with an explicit timestamp (used by tests).
    pub fn issued_at(subject: impl Into<String>, issued_at: DateTime<Utc>, ttl_secs: i64) -> Self {
        Self {
            subject: subject.into(),
            issued_at,
            ttl_secs,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.issued_at + Duration::seconds(self.ttl_secs)
    }

    /// Expiry check against an explicit clock reading.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
