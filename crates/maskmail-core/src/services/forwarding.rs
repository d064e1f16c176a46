/// Forwarding service: authorize, then hand off to the mail transport
use crate::authorizer::ForwardingAuthorizer;
use crate::constants::{DEFAULT_FORWARD_FROM, DEFAULT_TRANSPORT_TIMEOUT};
use crate::error::MaskmailError;
use crate::models::ForwardEnvelope;
use crate::services::mailer::Mailer;
use crate::utils::logging::{redact_body, redact_email, redact_subject};
use crate::utils::retry::{RetryConfig, retry_send};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// A message addressed to a masked alias
#[derive(Debug, Clone, Default)]
pub struct ForwardRequest {
    pub to_masked: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardReceipt {
    pub destination: String,
    /// Id or reply returned by the transport
    pub transport_id: String,
}

#[derive(Clone)]
pub struct ForwardingService {
    authorizer: ForwardingAuthorizer,
    mailer: Arc<dyn Mailer>,
    from: String,
    timeout: Duration,
    retry: RetryConfig,
}

impl ForwardingService {
    pub fn new(authorizer: ForwardingAuthorizer, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            authorizer,
            mailer,
            from: DEFAULT_FORWARD_FROM.to_string(),
            timeout: DEFAULT_TRANSPORT_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn authorizer(&self) -> &ForwardingAuthorizer {
        &self.authorizer
    }

    /// Forward one message to the alias's destination
    ///
    /// Errors: `NotFound` / `Expired` from authorization, `Transport` when
    /// the send fails or exceeds the timeout. The binding store is only read,
    /// and is no longer held once the send starts.
    pub async fn forward(&self, request: &ForwardRequest) -> Result<ForwardReceipt, MaskmailError> {
        let alias = request.to_masked.as_str();
        let destination = self
            .authorizer
            .authorize(alias)
            .await?
            .into_result(alias)?;

        let envelope = ForwardEnvelope::forwarded(
            &self.from,
            &destination,
            &request.subject,
            &request.message,
        );

        info!(
            alias = %alias,
            to = %redact_email(&destination),
            subject = %redact_subject(&request.subject),
            body = %redact_body(&request.message),
            "Forwarding message"
        );

        let transport_id = retry_send(&self.retry, alias, |_| {
            let mailer = Arc::clone(&self.mailer);
            let envelope = envelope.clone();
            let timeout = self.timeout;

            async move {
                match tokio::time::timeout(timeout, mailer.send(&envelope)).await {
                    Ok(Ok(id)) => Ok(id),
                    Ok(Err(e @ MaskmailError::Transport(_))) => Err(e),
                    Ok(Err(other)) => Err(MaskmailError::Transport(other.to_string())),
                    Err(_) => Err(MaskmailError::Transport(format!(
                        "send timed out after {}ms",
                        timeout.as_millis()
                    ))),
                }
            }
        })
        .await
        .inspect_err(|e| warn!(alias = %alias, error = %e, "Forwarding failed"))?;

        Ok(ForwardReceipt {
            destination,
            transport_id,
        })
    }
}
