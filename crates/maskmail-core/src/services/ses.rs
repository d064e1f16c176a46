/// SES email sending transport
use crate::error::MaskmailError;
use crate::models::ForwardEnvelope;
use crate::services::mailer::Mailer;
use crate::utils::logging::redact_email;
use async_trait::async_trait;
use aws_sdk_ses::primitives::Blob;
use aws_sdk_ses::types::RawMessage;

pub struct SesMailer {
    client: aws_sdk_ses::Client,
}

impl SesMailer {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }

    /// Build a client from the standard AWS environment
    pub async fn from_env() -> Self {
        let aws_config = aws_config::load_from_env().await;
        Self::new(aws_sdk_ses::Client::new(&aws_config))
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, envelope: &ForwardEnvelope) -> Result<String, MaskmailError> {
        let raw_message = RawMessage::builder()
            .data(Blob::new(envelope.to_raw()?))
            .build()
            .map_err(|e| MaskmailError::Transport(format!("Failed to build raw message: {}", e)))?;

        let response = self
            .client
            .send_raw_email()
            .raw_message(raw_message)
            .source(envelope.from.clone())
            .destinations(envelope.to.clone())
            .send()
            .await
            .map_err(|e| MaskmailError::Transport(format!("SES send_raw_email failed: {}", e)))?;

        let message_id = response.message_id().to_string();
        tracing::info!(
            message_id = %message_id,
            to = %redact_email(&envelope.to),
            "Sent email via SES"
        );
        Ok(message_id)
    }
}
