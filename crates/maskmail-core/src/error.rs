/// Error types for Maskmail system
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskmailError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Alias not found: {0}")]
    NotFound(String),

    #[error("Alias expired: {0}")]
    Expired(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Alias already taken: {0}")]
    AliasTaken(String),

    #[error("Alias generation exhausted: {0}")]
    AliasExhausted(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl MaskmailError {
    /// Determines if an error is retriable
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::InvalidInput(_) => false,
            Self::NotFound(_) => false,
            Self::Expired(_) => false,
            Self::AliasTaken(_) => false,
            Self::AliasExhausted(_) => false,
            Self::Config(_) => false,
            Self::Unknown(_) => false,
        }
    }
}

impl From<std::env::VarError> for MaskmailError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<lettre::error::Error> for MaskmailError {
    fn from(err: lettre::error::Error) -> Self {
        Self::InvalidInput(format!("Failed to build message: {}", err))
    }
}

impl From<lettre::address::AddressError> for MaskmailError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::InvalidInput(format!("Invalid email address: {}", err))
    }
}
