/// Alias lifecycle integration tests
///
/// These tests drive the public API end to end:
/// - issuance through `AliasService`
/// - authorization and forwarding before and after expiry
/// - reclamation via the sweeper
/// - concurrent issuance
use chrono::Duration as ChronoDuration;
use maskmail_core::services::{AliasService, ForwardRequest, ForwardingService, MockMailer};
use maskmail_core::{
    AliasGenerator, Authorization, BindingStore, DenyReason, ExpiryPolicy, ForwardingAuthorizer,
    InMemoryBindingStore, MaskmailError, ManualClock, Sweeper,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

struct Harness {
    clock: ManualClock,
    store: Arc<InMemoryBindingStore>,
    aliases: AliasService,
    authorizer: ForwardingAuthorizer,
}

fn harness() -> Harness {
    let clock = ManualClock::starting_now();
    let store = Arc::new(InMemoryBindingStore::new(Arc::new(clock.clone())));
    let aliases = AliasService::new(
        AliasGenerator::default(),
        ExpiryPolicy::default(),
        store.clone(),
    );
    let authorizer = ForwardingAuthorizer::new(store.clone());
    Harness {
        clock,
        store,
        aliases,
        authorizer,
    }
}

#[tokio::test]
async fn premium_alias_lives_seven_days() {
    let h = harness();
    let binding = assert_ok!(h.aliases.generate(Some("a@b.com"), Some("premium")).await);

    h.clock.advance(ChronoDuration::days(1));
    assert_eq!(
        h.authorizer.authorize(&binding.alias).await.unwrap(),
        Authorization::Allow {
            destination: "a@b.com".to_string()
        }
    );

    h.clock.advance(ChronoDuration::days(7));
    assert_eq!(
        h.authorizer.authorize(&binding.alias).await.unwrap(),
        Authorization::Deny(DenyReason::Expired)
    );
}

#[tokio::test]
async fn free_alias_expires_after_one_day() {
    let h = harness();
    let binding = assert_ok!(h.aliases.generate(Some("a@b.com"), Some("basic")).await);

    h.clock.advance(ChronoDuration::hours(23));
    assert!(h.authorizer.authorize(&binding.alias).await.unwrap().is_allowed());

    h.clock.advance(ChronoDuration::hours(2));
    assert_eq!(
        h.authorizer.authorize(&binding.alias).await.unwrap(),
        Authorization::Deny(DenyReason::Expired)
    );
}

#[tokio::test]
async fn unknown_alias_is_not_found() {
    let h = harness();
    assert_eq!(
        h.authorizer.authorize("nonexistent-alias").await.unwrap(),
        Authorization::Deny(DenyReason::NotFound)
    );
}

#[tokio::test]
async fn sweep_removes_exactly_the_expired() {
    let h = harness();
    let short = h.aliases.generate(Some("a@b.com"), None).await.unwrap();
    let long = h
        .aliases
        .generate(Some("c@d.com"), Some("premium"))
        .await
        .unwrap();

    let sweeper = Sweeper::new(
        h.store.clone(),
        Arc::new(h.clock.clone()),
        Duration::from_secs(3600),
    );

    h.clock.advance(ChronoDuration::days(2));
    assert_eq!(sweeper.run_once().await.unwrap(), 1);
    assert_eq!(sweeper.run_once().await.unwrap(), 0);

    // Swept alias now reads as never issued; the other is untouched
    assert_eq!(
        h.authorizer.authorize(&short.alias).await.unwrap(),
        Authorization::Deny(DenyReason::NotFound)
    );
    assert!(h.authorizer.authorize(&long.alias).await.unwrap().is_allowed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_generation_yields_distinct_aliases() {
    let h = harness();
    let aliases = Arc::new(h.aliases);

    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let aliases = aliases.clone();
            tokio::spawn(async move {
                aliases
                    .generate(Some(&format!("user{}@example.com", i)), None)
                    .await
            })
        })
        .collect();

    let results = futures::future::join_all(tasks).await;
    let bindings: Vec<_> = results
        .into_iter()
        .map(|r| r.unwrap().unwrap())
        .collect();

    let distinct: HashSet<_> = bindings.iter().map(|b| b.alias.clone()).collect();
    assert_eq!(distinct.len(), 64);

    for binding in &bindings {
        assert_eq!(
            h.authorizer.authorize(&binding.alias).await.unwrap(),
            Authorization::Allow {
                destination: binding.destination.clone()
            }
        );
    }
    assert_eq!(h.store.len().await.unwrap(), 64);
}

#[tokio::test]
async fn forwarding_distinguishes_failure_modes() {
    let h = harness();
    let binding = h.aliases.generate(Some("a@b.com"), None).await.unwrap();

    let ok = ForwardingService::new(h.authorizer.clone(), Arc::new(MockMailer::succeeding()));
    let broken = ForwardingService::new(h.authorizer.clone(), Arc::new(MockMailer::failing()));

    let request = |alias: &str| ForwardRequest {
        to_masked: alias.to_string(),
        subject: "Hi".to_string(),
        message: "Hello there".to_string(),
    };

    let receipt = assert_ok!(ok.forward(&request(&binding.alias)).await);
    assert_eq!(receipt.destination, "a@b.com");

    let err = assert_err!(broken.forward(&request(&binding.alias)).await);
    assert!(matches!(err, MaskmailError::Transport(_)));

    let err = assert_err!(ok.forward(&request("ghost@maskmail.io")).await);
    assert!(matches!(err, MaskmailError::NotFound(_)));

    h.clock.advance(ChronoDuration::days(2));
    let err = assert_err!(ok.forward(&request(&binding.alias)).await);
    assert!(matches!(err, MaskmailError::Expired(_)));
}
