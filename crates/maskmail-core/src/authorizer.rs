//! Forwarding authorization.
//!
//! Decides whether a message addressed to an alias may be forwarded and to
//! where. Authorization is read-only: it never creates, renews or removes a
//! binding.

use crate::error::MaskmailError;
use crate::store::{BindingStore, Resolution};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Why a forwarding request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// Alias was never issued (or was swept long ago)
    NotFound,
    /// Alias exists but its lifetime has lapsed
    Expired,
    /// Authorized, but the downstream send failed or timed out
    TransportFailure,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "Masked email not found."),
            Self::Expired => write!(f, "Masked email expired."),
            Self::TransportFailure => write!(f, "Failed to forward email."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Allow { destination: String },
    Deny(DenyReason),
}

impl Authorization {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    /// Convert into the error taxonomy shared with the HTTP layer
    pub fn into_result(self, alias: &str) -> Result<String, MaskmailError> {
        match self {
            Self::Allow { destination } => Ok(destination),
            Self::Deny(DenyReason::NotFound) => Err(MaskmailError::NotFound(alias.to_string())),
            Self::Deny(DenyReason::Expired) => Err(MaskmailError::Expired(alias.to_string())),
            Self::Deny(DenyReason::TransportFailure) => {
                Err(MaskmailError::Transport(alias.to_string()))
            }
        }
    }
}

#[derive(Clone)]
pub struct ForwardingAuthorizer {
    store: Arc<dyn BindingStore>,
}

impl ForwardingAuthorizer {
    pub fn new(store: Arc<dyn BindingStore>) -> Self {
        Self { store }
    }

    /// Check an alias against the store
    ///
    /// Only yields `NotFound` or `Expired` denials; transport failures are
    /// reported by the forwarding service after the send is attempted.
    pub async fn authorize(&self, alias: &str) -> Result<Authorization, MaskmailError> {
        let decision = match self.store.resolve(alias).await? {
            Resolution::Live(binding) => Authorization::Allow {
                destination: binding.destination,
            },
            Resolution::Expired(_) => Authorization::Deny(DenyReason::Expired),
            Resolution::Missing => Authorization::Deny(DenyReason::NotFound),
        };

        debug!(alias = %alias, allowed = decision.is_allowed(), "Authorization decided");
        Ok(decision)
    }
}
