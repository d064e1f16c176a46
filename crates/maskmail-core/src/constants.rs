/// Application constants
///
/// Hardcoded defaults used throughout the service. Anything an operator may
/// want to change is also exposed through `MaskmailConfig`.
use std::time::Duration;

// ============================================================================
// Alias Constants
// ============================================================================

/// Service domain appended to every generated alias token
pub const DEFAULT_ALIAS_DOMAIN: &str = "maskmail.io";

/// Number of hex characters taken from a random UUID to form a token
pub const ALIAS_TOKEN_LENGTH: usize = 8;

/// Maximum number of generate-and-insert attempts before giving up
pub const MAX_ALIAS_ATTEMPTS: u32 = 8;

// ============================================================================
// Expiry Constants
// ============================================================================

/// Plan tier name that unlocks the long lifetime
pub const PREMIUM_PLAN: &str = "premium";

/// Alias lifetime for the premium tier (7 days)
pub const PREMIUM_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Alias lifetime for every other tier (24 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// How often expired bindings are physically removed (1 hour)
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

// ============================================================================
// Forwarding Constants
// ============================================================================

/// Sender address of every forwarded message
pub const DEFAULT_FORWARD_FROM: &str = "noreply@maskmail.io";

/// Prefix prepended to the subject of forwarded messages
pub const FORWARD_SUBJECT_PREFIX: &str = "[MaskMail]";

/// Per-attempt upper bound on a transport send
pub const DEFAULT_TRANSPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default SMTP relay
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

// ============================================================================
// Retry Configuration
// ============================================================================

/// Extra send attempts after the first one (0 = single attempt)
pub const DEFAULT_TRANSPORT_MAX_RETRIES: u32 = 0;

/// Base delay for exponential backoff in milliseconds
pub const RETRY_BASE_DELAY_MS: u64 = 500;

/// Maximum delay for exponential backoff in milliseconds
pub const RETRY_MAX_DELAY_MS: u64 = 10 * 1000;

/// Jitter factor for retry delays (0.0 to 1.0)
pub const RETRY_JITTER_FACTOR: f64 = 0.1;

// ============================================================================
// HTTP Constants
// ============================================================================

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Browser origin allowed by CORS
pub const DEFAULT_CORS_ORIGIN: &str = "https://email-masking-frontend.vercel.app";

/// Maximum request body size (1 MiB)
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Body returned by the liveness probe
pub const LIVENESS_MESSAGE: &str = "Backend is working!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_ordering() {
        assert!(PREMIUM_TTL > DEFAULT_TTL);
        assert!(DEFAULT_TTL > Duration::ZERO);
    }

    #[test]
    fn test_retry_bounds() {
        assert!(RETRY_BASE_DELAY_MS < RETRY_MAX_DELAY_MS);
        assert!((0.0..=1.0).contains(&RETRY_JITTER_FACTOR));
    }
}
