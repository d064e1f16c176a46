/// Alias issuance: generator + expiry policy + store
use crate::alias::AliasGenerator;
use crate::constants::MAX_ALIAS_ATTEMPTS;
use crate::error::MaskmailError;
use crate::models::{Binding, Plan};
use crate::policy::ExpiryPolicy;
use crate::store::BindingStore;
use crate::utils::logging::redact_email;
use crate::utils::validation::normalize_destination;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AliasService {
    generator: AliasGenerator,
    policy: ExpiryPolicy,
    store: Arc<dyn BindingStore>,
    max_attempts: u32,
}

impl AliasService {
    pub fn new(
        generator: AliasGenerator,
        policy: ExpiryPolicy,
        store: Arc<dyn BindingStore>,
    ) -> Self {
        Self {
            generator,
            policy,
            store,
            max_attempts: MAX_ALIAS_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn store(&self) -> &Arc<dyn BindingStore> {
        &self.store
    }

    /// Issue a fresh alias bound to `real_email` for the plan's lifetime
    ///
    /// A generated alias that is already present in the store is discarded
    /// and regenerated, up to `max_attempts` times.
    pub async fn generate(
        &self,
        real_email: Option<&str>,
        plan: Option<&str>,
    ) -> Result<Binding, MaskmailError> {
        let destination = normalize_destination(real_email)?;
        let tier = Plan::from_tier(plan);
        let ttl = self.policy.ttl_for(tier);

        for attempt in 1..=self.max_attempts {
            let alias = self.generator.generate();

            match self.store.create(&alias, &destination, ttl).await {
                Ok(binding) => {
                    info!(
                        alias = %binding.alias,
                        destination = %redact_email(&destination),
                        plan = tier.as_str(),
                        expires_at = %binding.expires_at,
                        "Issued masked alias"
                    );
                    return Ok(binding);
                }
                Err(MaskmailError::AliasTaken(taken)) => {
                    warn!(alias = %taken, attempt = attempt, "Alias collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(MaskmailError::AliasExhausted(format!(
            "no free alias after {} attempts",
            self.max_attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::store::{InMemoryBindingStore, MockBindingStore};
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn service() -> (AliasService, ManualClock) {
        let clock = ManualClock::starting_now();
        let store = Arc::new(InMemoryBindingStore::new(Arc::new(clock.clone())));
        let service = AliasService::new(AliasGenerator::default(), ExpiryPolicy::default(), store);
        (service, clock)
    }

    #[tokio::test]
    async fn test_generate_binds_destination() {
        let (service, clock) = service();

        let binding = service.generate(Some("a@b.com"), None).await.unwrap();
        assert!(binding.alias.ends_with("@maskmail.io"));
        assert_eq!(binding.destination, "a@b.com");
        assert_eq!(binding.expires_at, clock.now() + chrono::Duration::days(1));

        let found = service.store().lookup(&binding.alias).await.unwrap();
        assert_eq!(found, Some(binding));
    }

    #[tokio::test]
    async fn test_generate_premium_lifetime() {
        let (service, clock) = service();
        let binding = service
            .generate(Some("a@b.com"), Some("premium"))
            .await
            .unwrap();
        assert_eq!(binding.expires_at, clock.now() + chrono::Duration::days(7));
    }

    #[tokio::test]
    async fn test_generate_requires_destination() {
        let (service, _) = service();

        let err = service.generate(None, None).await.unwrap_err();
        assert!(matches!(err, MaskmailError::InvalidInput(_)));

        let err = service.generate(Some(""), Some("premium")).await.unwrap_err();
        assert!(matches!(err, MaskmailError::InvalidInput(_)));

        assert_eq!(service.store().len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_generate_retries_on_collision() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let mut store = MockBindingStore::new();
        store.expect_create().returning(move |alias, destination, _| {
            if calls_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(MaskmailError::AliasTaken(alias.to_string()))
            } else {
                Ok(Binding::new(
                    alias.to_string(),
                    destination.to_string(),
                    Utc::now(),
                ))
            }
        });

        let service = AliasService::new(
            AliasGenerator::default(),
            ExpiryPolicy::default(),
            Arc::new(store),
        );

        let binding = service.generate(Some("a@b.com"), None).await.unwrap();
        assert_eq!(binding.destination, "a@b.com");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_generate_exhausts_when_space_is_full() {
        let clock = ManualClock::starting_now();
        let store = Arc::new(InMemoryBindingStore::new(Arc::new(clock)));

        // Single hex digit tokens leave only 16 possible aliases
        for digit in "0123456789abcdef".chars() {
            store
                .create(
                    &format!("{}@maskmail.io", digit),
                    "taken@b.com",
                    Duration::from_secs(60),
                )
                .await
                .unwrap();
        }

        let service = AliasService::new(
            AliasGenerator::default().with_token_length(1),
            ExpiryPolicy::default(),
            store.clone(),
        )
        .with_max_attempts(4);

        let err = service.generate(Some("a@b.com"), None).await.unwrap_err();
        assert!(matches!(err, MaskmailError::AliasExhausted(_)));
        assert_eq!(store.len().await.unwrap(), 16);
    }
}
