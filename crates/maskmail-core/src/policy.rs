/// Expiry policy: plan tier to time-to-live
use crate::constants::{DEFAULT_TTL, PREMIUM_TTL};
use crate::models::Plan;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ExpiryPolicy {
    pub premium_ttl: Duration,
    pub default_ttl: Duration,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            premium_ttl: PREMIUM_TTL,
            default_ttl: DEFAULT_TTL,
        }
    }
}

impl ExpiryPolicy {
    pub fn new(premium_ttl: Duration, default_ttl: Duration) -> Self {
        Self {
            premium_ttl,
            default_ttl,
        }
    }

    /// TTL for a raw tier name; total over every input
    pub fn ttl(&self, tier: Option<&str>) -> Duration {
        self.ttl_for(Plan::from_tier(tier))
    }

    pub fn ttl_for(&self, plan: Plan) -> Duration {
        match plan {
            Plan::Premium => self.premium_ttl,
            Plan::Free => self.default_ttl,
        }
    }
}
