//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check backend URLs parse as usable endpoints
//! - Validate value ranges (timeouts > 0, bind address parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before the process binds its listen socket

use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;
use crate::load_balancer::Endpoint;

/// One semantic problem found in a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("backend list is empty")]
    NoBackends,

    #[error("{0}")]
    InvalidBackend(#[from] crate::load_balancer::EndpointError),

    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("transport.{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("transport.max_idle_per_host must be greater than zero")]
    ZeroIdleCap,
}

/// Check a configuration for semantic problems, collecting every error.
pub fn validate(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.backends.is_empty() {
        errors.push(ValidationError::NoBackends);
    }
    for raw in &config.backends {
        if let Err(e) = Endpoint::parse(raw) {
            errors.push(ValidationError::InvalidBackend(e));
        }
    }

    let transport = &config.transport;
    for (name, value) in [
        ("connect_secs", transport.connect_secs),
        ("tls_handshake_secs", transport.tls_handshake_secs),
        ("response_header_secs", transport.response_header_secs),
        ("idle_secs", transport.idle_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroDuration(name));
        }
    }
    if transport.max_idle_per_host == 0 {
        errors.push(ValidationError::ZeroIdleCap);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ProxyConfig {
        ProxyConfig {
            backends: vec!["http://b1:3000".into(), "http://b2:3000".into()],
            ..ProxyConfig::default()
        }
    }

    #[test]
    fn accepts_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn rejects_empty_backend_list() {
        let config = ProxyConfig::default();
        let errors = validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::NoBackends)));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = valid_config();
        config.backends.push("::bad::".into());
        config.listener.bind_address = "not-an-address".into();
        config.transport.response_header_secs = 0;

        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_zero_idle_cap() {
        let mut config = valid_config();
        config.transport.max_idle_per_host = 0;
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ZeroIdleCap)));
    }
}
