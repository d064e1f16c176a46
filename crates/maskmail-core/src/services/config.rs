/// Configuration - loaded from environment variables
use crate::constants::{
    DEFAULT_ALIAS_DOMAIN, DEFAULT_CORS_ORIGIN, DEFAULT_FORWARD_FROM, DEFAULT_PORT,
    DEFAULT_SMTP_HOST, DEFAULT_SWEEP_INTERVAL, DEFAULT_TRANSPORT_MAX_RETRIES,
    DEFAULT_TRANSPORT_TIMEOUT,
};
use crate::error::MaskmailError;
use crate::utils::logging::LogFormat;
use crate::utils::validation::validate_email_address;
use std::str::FromStr;
use std::time::Duration;

/// Which mail transport forwards messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    #[default]
    Smtp,
    Ses,
}

impl FromStr for TransportKind {
    type Err = MaskmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smtp" => Ok(Self::Smtp),
            "ses" => Ok(Self::Ses),
            other => Err(MaskmailError::Config(format!(
                "Unknown MAIL_TRANSPORT: {}",
                other
            ))),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct MaskmailConfig {
    pub port: u16,
    pub alias_domain: String,
    pub forward_from: String,
    pub cors_origin: String,
    pub transport: TransportKind,
    pub smtp_host: String,
    /// Opaque pass-through credentials for the SMTP relay
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub sweep_interval: Duration,
    pub transport_timeout: Duration,
    pub transport_max_retries: u32,
    pub log_format: LogFormat,
}

impl Default for MaskmailConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            alias_domain: DEFAULT_ALIAS_DOMAIN.to_string(),
            forward_from: DEFAULT_FORWARD_FROM.to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            transport: TransportKind::Smtp,
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_user: None,
            smtp_pass: None,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            transport_timeout: DEFAULT_TRANSPORT_TIMEOUT,
            transport_max_retries: DEFAULT_TRANSPORT_MAX_RETRIES,
            log_format: LogFormat::Json,
        }
    }
}

impl MaskmailConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, MaskmailError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset or blank keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MaskmailError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            port: parse_or(get("PORT"), "PORT", defaults.port)?,
            alias_domain: get("ALIAS_DOMAIN").unwrap_or(defaults.alias_domain),
            forward_from: get("FORWARD_FROM").unwrap_or(defaults.forward_from),
            cors_origin: get("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            transport: get("MAIL_TRANSPORT")
                .map(|v| v.parse::<TransportKind>())
                .transpose()?
                .unwrap_or(defaults.transport),
            smtp_host: get("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_user: get("SMTP_USER"),
            smtp_pass: get("SMTP_PASS"),
            sweep_interval: Duration::from_secs(parse_or(
                get("SWEEP_INTERVAL_SECS"),
                "SWEEP_INTERVAL_SECS",
                defaults.sweep_interval.as_secs(),
            )?),
            transport_timeout: Duration::from_secs(parse_or(
                get("TRANSPORT_TIMEOUT_SECS"),
                "TRANSPORT_TIMEOUT_SECS",
                defaults.transport_timeout.as_secs(),
            )?),
            transport_max_retries: parse_or(
                get("TRANSPORT_MAX_RETRIES"),
                "TRANSPORT_MAX_RETRIES",
                defaults.transport_max_retries,
            )?,
            log_format: LogFormat::parse(get("LOG_FORMAT").as_deref()),
        };

        config
            .validate()
            .map_err(|e| MaskmailError::Config(format!("Invalid configuration: {}", e)))?;

        tracing::info!("Configuration validated successfully");
        Ok(config)
    }

    /// Validates configuration is valid
    pub fn validate(&self) -> Result<(), String> {
        if self.alias_domain.trim().is_empty() {
            return Err("Alias domain not configured".to_string());
        }

        if validate_email_address(&self.forward_from).is_err() {
            return Err(format!("Invalid FORWARD_FROM: {}", self.forward_from));
        }

        if self.sweep_interval.is_zero() {
            return Err("Sweep interval must be > 0".to_string());
        }

        if self.transport_timeout.is_zero() {
            return Err("Transport timeout must be > 0".to_string());
        }

        if self.transport == TransportKind::Smtp && self.smtp_host.trim().is_empty() {
            return Err("SMTP host not configured".to_string());
        }

        Ok(())
    }

    /// SMTP credentials, present only when both halves are set
    pub fn smtp_credentials(&self) -> Option<(String, String)> {
        match (&self.smtp_user, &self.smtp_pass) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T, MaskmailError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| MaskmailError::Config(format!("Invalid {}: {}", key, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = MaskmailConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.alias_domain, "maskmail.io");
        assert_eq!(config.transport, TransportKind::Smtp);
        assert_eq!(config.sweep_interval, Duration::from_secs(3600));
        assert_eq!(config.transport_max_retries, 0);
        assert!(config.smtp_credentials().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = MaskmailConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("SMTP_USER", "svc@gmail.com"),
            ("SMTP_PASS", "app-password"),
            ("MAIL_TRANSPORT", "SES"),
            ("SWEEP_INTERVAL_SECS", "60"),
            ("LOG_FORMAT", "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.transport, TransportKind::Ses);
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(
            config.smtp_credentials(),
            Some(("svc@gmail.com".to_string(), "app-password".to_string()))
        );
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = MaskmailConfig::from_lookup(lookup_from(&[("PORT", "  ")])).unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(MaskmailConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")])).is_err());
        assert!(MaskmailConfig::from_lookup(lookup_from(&[("PORT", "70000")])).is_err());
        assert!(MaskmailConfig::from_lookup(lookup_from(&[("MAIL_TRANSPORT", "pigeon")])).is_err());
        assert!(
            MaskmailConfig::from_lookup(lookup_from(&[("SWEEP_INTERVAL_SECS", "0")])).is_err()
        );
        assert!(
            MaskmailConfig::from_lookup(lookup_from(&[("FORWARD_FROM", "nobody")])).is_err()
        );
    }
}
