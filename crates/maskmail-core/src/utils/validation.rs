/// Input validation utilities
use crate::error::MaskmailError;
use lettre::message::Mailbox;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Maximum email address length (RFC 5321)
const MAX_EMAIL_ADDRESS_LENGTH: usize = 320;

/// Accepts a bare address that the outbound envelope can also be built with
pub fn validate_email_address(email: &str) -> Result<(), MaskmailError> {
    if email.len() <= MAX_EMAIL_ADDRESS_LENGTH
        && EMAIL_REGEX.is_match(email)
        && email.parse::<Mailbox>().is_ok()
    {
        Ok(())
    } else {
        Err(MaskmailError::InvalidInput(format!(
            "Invalid email address: {}",
            email
        )))
    }
}

/// Validate a destination supplied by a caller, returning it trimmed
pub fn normalize_destination(raw: Option<&str>) -> Result<String, MaskmailError> {
    let destination = raw.map(str::trim).unwrap_or_default();
    if destination.is_empty() {
        return Err(MaskmailError::InvalidInput(
            "Real email required.".to_string(),
        ));
    }
    validate_email_address(destination)?;
    Ok(destination.to_string())
}
