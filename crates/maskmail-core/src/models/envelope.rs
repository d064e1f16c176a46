/// Outbound forwarded message
use crate::constants::FORWARD_SUBJECT_PREFIX;
use lettre::Message;
use lettre::message::{Mailbox, header::ContentType};

/// A message ready to hand to a `Mailer`
///
/// Built after authorization; carries the resolved destination so the
/// transport never needs to touch the binding store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardEnvelope {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl ForwardEnvelope {
    /// Builds the forwarded copy, prefixing the subject
    pub fn forwarded(from: &str, to: &str, subject: &str, text: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: format!("{} {}", FORWARD_SUBJECT_PREFIX, subject),
            text: text.to_string(),
        }
    }

    /// Composes an RFC 5322 message with lettre
    pub fn to_message(&self) -> Result<Message, crate::MaskmailError> {
        let from: Mailbox = self.from.parse()?;
        let to: Mailbox = self.to.parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(self.text.clone())?;

        Ok(message)
    }

    /// Raw bytes of the composed message
    pub fn to_raw(&self) -> Result<Vec<u8>, crate::MaskmailError> {
        Ok(self.to_message()?.formatted())
    }
}
