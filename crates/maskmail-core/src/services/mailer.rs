/// Mail transport abstraction and SMTP implementation
use crate::error::MaskmailError;
use crate::models::ForwardEnvelope;
use crate::utils::logging::redact_email;
use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message, returning a transport-specific id or reply
    async fn send(&self, envelope: &ForwardEnvelope) -> Result<String, MaskmailError>;
}

/// SMTP relay transport (STARTTLS/TLS via rustls)
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a relay transport; `credentials` are passed through untouched
    pub fn new(host: &str, credentials: Option<(String, String)>) -> Result<Self, MaskmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host).map_err(|e| {
            MaskmailError::Config(format!("Invalid SMTP relay {}: {}", host, e))
        })?;

        if let Some((user, pass)) = credentials {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, envelope: &ForwardEnvelope) -> Result<String, MaskmailError> {
        let message = envelope.to_message()?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MaskmailError::Transport(format!("SMTP send failed: {}", e)))?;

        let reply = response.message().collect::<Vec<_>>().join(" ");
        tracing::info!(
            to = %redact_email(&envelope.to),
            code = %response.code(),
            "Sent email via SMTP"
        );
        Ok(reply)
    }
}

/// How a `MockMailer` responds to sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    Succeed,
    Fail,
    /// Never completes; exercises the send timeout
    Hang,
}

/// In-memory mailer for tests
pub struct MockMailer {
    behavior: MockBehavior,
    attempts: AtomicU32,
    sent: Mutex<Vec<ForwardEnvelope>>,
}

impl MockMailer {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            attempts: AtomicU32::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(MockBehavior::Succeed)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Fail)
    }

    pub fn hanging() -> Self {
        Self::new(MockBehavior::Hang)
    }

    /// Number of send attempts, successful or not
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Envelopes that were sent successfully
    pub fn sent(&self) -> Vec<ForwardEnvelope> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, envelope: &ForwardEnvelope) -> Result<String, MaskmailError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Succeed => {
                self.sent
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(envelope.clone());
                Ok(format!("mock-{}", attempt))
            }
            MockBehavior::Fail => Err(MaskmailError::Transport(
                "Mock transport failure".to_string(),
            )),
            MockBehavior::Hang => futures::future::pending().await,
        }
    }
}
