/// API Context - shared state for all API handlers
use maskmail_core::services::{
    AliasService, ForwardingService, Mailer, MaskmailConfig, SesMailer, SmtpMailer, TransportKind,
};
use maskmail_core::utils::RetryConfig;
use maskmail_core::{
    AliasGenerator, BindingStore, Clock, ExpiryPolicy, ForwardingAuthorizer, InMemoryBindingStore,
    MaskmailError,
};
use std::sync::Arc;
use tracing::info;

/// API Context contains shared resources for API handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Alias issuance
    pub aliases: AliasService,

    /// Authorization + transport hand-off
    pub forwarder: ForwardingService,

    /// Binding store shared with the sweeper
    pub store: Arc<dyn BindingStore>,

    /// Runtime configuration
    pub config: Arc<MaskmailConfig>,
}

impl ApiContext {
    /// Wire services around an existing store and mailer
    pub fn new(
        config: MaskmailConfig,
        store: Arc<dyn BindingStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Arc<Self> {
        let aliases = AliasService::new(
            AliasGenerator::new(config.alias_domain.clone()),
            ExpiryPolicy::default(),
            Arc::clone(&store),
        );

        let authorizer = ForwardingAuthorizer::new(Arc::clone(&store));
        let forwarder = ForwardingService::new(authorizer, mailer)
            .with_from(config.forward_from.clone())
            .with_timeout(config.transport_timeout)
            .with_retry(RetryConfig {
                max_retries: config.transport_max_retries,
                ..RetryConfig::default()
            });

        Arc::new(Self {
            aliases,
            forwarder,
            store,
            config: Arc::new(config),
        })
    }

    /// Create a context with an in-memory store and the configured transport
    pub async fn from_config(
        config: MaskmailConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Arc<Self>, MaskmailError> {
        let store: Arc<dyn BindingStore> = Arc::new(InMemoryBindingStore::new(clock));

        let mailer: Arc<dyn Mailer> = match config.transport {
            TransportKind::Smtp => {
                info!(host = %config.smtp_host, "Using SMTP transport");
                Arc::new(SmtpMailer::new(&config.smtp_host, config.smtp_credentials())?)
            }
            TransportKind::Ses => {
                info!("Using SES transport");
                Arc::new(SesMailer::from_env().await)
            }
        };

        Ok(Self::new(config, store, mailer))
    }
}
