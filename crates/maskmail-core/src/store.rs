//! Binding store: alias -> (destination, expiry).
//!
//! Two-phase expiry: reads hide expired bindings immediately (lazy expiry)
//! and the sweeper physically removes them later. Callers therefore never
//! observe an expired binding as live, whatever the sweep timing.

use crate::clock::Clock;
use crate::error::MaskmailError;
use crate::models::Binding;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Result of resolving an alias against storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Present and not yet past its expiry
    Live(Binding),
    /// Present in storage but expired (not yet swept)
    Expired(Binding),
    /// Never issued, or already swept
    Missing,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BindingStore: Send + Sync {
    /// Insert a new binding expiring `ttl` from now
    ///
    /// Fails with `InvalidInput` for an empty destination and with
    /// `AliasTaken` if the alias is already present, live or not.
    async fn create(
        &self,
        alias: &str,
        destination: &str,
        ttl: Duration,
    ) -> Result<Binding, MaskmailError>;

    /// Resolve an alias, distinguishing expired-but-present from missing
    async fn resolve(&self, alias: &str) -> Result<Resolution, MaskmailError>;

    /// Return the binding only if it is live
    async fn lookup(&self, alias: &str) -> Result<Option<Binding>, MaskmailError> {
        match self.resolve(alias).await? {
            Resolution::Live(binding) => Ok(Some(binding)),
            Resolution::Expired(_) | Resolution::Missing => Ok(None),
        }
    }

    /// Remove every binding with `expires_at < now`, returning how many
    async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize, MaskmailError>;

    /// Number of stored bindings, live or awaiting sweep
    async fn len(&self) -> Result<usize, MaskmailError>;
}

/// Process-local store guarded by a read/write lock
///
/// Reads run concurrently; inserts and sweeps are serialized. Every
/// operation releases the lock before returning, and returned bindings are
/// owned copies.
pub struct InMemoryBindingStore {
    bindings: RwLock<HashMap<String, Binding>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryBindingStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
            clock,
        }
    }

    fn expiry_from(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, MaskmailError> {
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|e| MaskmailError::InvalidInput(format!("TTL out of range: {}", e)))?;
        now.checked_add_signed(ttl)
            .ok_or_else(|| MaskmailError::InvalidInput("TTL overflows timestamp".to_string()))
    }
}

#[async_trait]
impl BindingStore for InMemoryBindingStore {
    async fn create(
        &self,
        alias: &str,
        destination: &str,
        ttl: Duration,
    ) -> Result<Binding, MaskmailError> {
        if destination.trim().is_empty() {
            return Err(MaskmailError::InvalidInput(
                "Real email required.".to_string(),
            ));
        }
        if alias.is_empty() {
            return Err(MaskmailError::InvalidInput("Alias required.".to_string()));
        }

        let expires_at = Self::expiry_from(self.clock.now(), ttl)?;
        let binding = Binding::new(alias.to_string(), destination.to_string(), expires_at);

        let mut bindings = self.bindings.write().await;
        if bindings.contains_key(alias) {
            warn!(alias = %alias, "Refusing to overwrite existing binding");
            return Err(MaskmailError::AliasTaken(alias.to_string()));
        }
        bindings.insert(alias.to_string(), binding.clone());

        debug!(alias = %alias, expires_at = %expires_at, "Created binding");
        Ok(binding)
    }

    async fn resolve(&self, alias: &str) -> Result<Resolution, MaskmailError> {
        let found = self.bindings.read().await.get(alias).cloned();
        let now = self.clock.now();

        Ok(match found {
            Some(binding) if binding.is_live_at(now) => Resolution::Live(binding),
            Some(binding) => Resolution::Expired(binding),
            None => Resolution::Missing,
        })
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize, MaskmailError> {
        let mut bindings = self.bindings.write().await;
        let before = bindings.len();
        bindings.retain(|_, binding| !binding.is_reclaimable_at(now));
        Ok(before - bindings.len())
    }

    async fn len(&self) -> Result<usize, MaskmailError> {
        Ok(self.bindings.read().await.len())
    }
}
