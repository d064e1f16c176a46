//! Alias generation.
//!
//! An alias is `<token>@<service-domain>` where the token is a prefix of a
//! random (v4) UUID. The generator never touches the store; uniqueness
//! against live bindings is enforced by the store refusing duplicates and
//! the issuing service regenerating (see `services::aliases`).

use crate::constants::{ALIAS_TOKEN_LENGTH, DEFAULT_ALIAS_DOMAIN};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AliasGenerator {
    domain: String,
    token_length: usize,
}

impl AliasGenerator {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            token_length: ALIAS_TOKEN_LENGTH,
        }
    }

    /// Override the token length (clamped to the 32 hex digits of a UUID)
    pub fn with_token_length(mut self, token_length: usize) -> Self {
        self.token_length = token_length.clamp(1, 32);
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Produce a fresh alias
    pub fn generate(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        format!("{}@{}", &token[..self.token_length], self.domain)
    }
}

impl Default for AliasGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ALIAS_DOMAIN)
    }
}
