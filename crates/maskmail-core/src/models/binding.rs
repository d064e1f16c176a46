/// Alias binding model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The (alias, destination, expiry) record
///
/// Bindings are never mutated after creation. Liveness is not stored; it is
/// derived from `expires_at` and the current time on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub alias: String,
    pub destination: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl Binding {
    pub fn new(alias: String, destination: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            alias,
            destination,
            expires_at,
        }
    }

    /// Live iff `now <= expires_at`
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }

    /// Eligible for physical removal (strictly past its expiry)
    pub fn is_reclaimable_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
