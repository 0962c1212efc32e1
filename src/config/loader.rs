//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{self, ValidationError};

/// Environment variable holding a comma-separated backend URL list.
pub const BACKENDS_ENV: &str = "PROXY_BACKENDS";

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Validation(Vec<ValidationError>),
}

/// Load, override and validate the configuration.
///
/// Starts from defaults or an optional TOML file, then applies the
/// `PROXY_BACKENDS` and `PORT` environment overrides supplied by the
/// deployment environment.
pub fn load(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config: ProxyConfig = match path {
        Some(p) => toml::from_str(&fs::read_to_string(p)?)?,
        None => ProxyConfig::default(),
    };

    apply_overrides(
        &mut config,
        env::var(BACKENDS_ENV).ok(),
        env::var(PORT_ENV).ok(),
    );

    validation::validate(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment-style overrides onto a loaded configuration.
///
/// Split out from [`load`] so the override logic is testable without
/// touching process environment.
fn apply_overrides(config: &mut ProxyConfig, backends: Option<String>, port: Option<String>) {
    if let Some(list) = backends {
        config.backends = list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Some(port) = port {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{host}:{port}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backends_override_replaces_list() {
        let mut config = ProxyConfig {
            backends: vec!["http://old:1".into()],
            ..ProxyConfig::default()
        };

        apply_overrides(
            &mut config,
            Some("http://b1:3000, http://b2:3000 ,".into()),
            None,
        );

        assert_eq!(
            config.backends,
            vec!["http://b1:3000".to_string(), "http://b2:3000".to_string()]
        );
    }

    #[test]
    fn port_override_keeps_host() {
        let mut config = ProxyConfig::default();
        apply_overrides(&mut config, None, Some("3000".into()));
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn no_overrides_leaves_config_untouched() {
        let mut config = ProxyConfig {
            backends: vec!["http://b1".into()],
            ..ProxyConfig::default()
        };
        apply_overrides(&mut config, None, None);
        assert_eq!(config.backends, vec!["http://b1".to_string()]);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
