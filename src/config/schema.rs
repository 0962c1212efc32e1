//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has an explicit default so minimal configs work.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend base URLs, in rotation order. Each must be an absolute
    /// http(s) URL; an optional path becomes a prefix for forwarded paths.
    pub backends: Vec<String>,

    /// Request rewrite behavior.
    pub forwarding: ForwardingConfig,

    /// Outbound transport tuning (timeouts, pooling).
    pub transport: TransportConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// How inbound requests are rewritten before dispatch.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Overwrite the `Host` header with the chosen backend's authority.
    ///
    /// Off by default: preserving the client's `Host` is the safer choice
    /// for virtual-hosted backends. Enable when backends require their own
    /// hostname.
    pub rewrite_host_header: bool,

    /// Force `Connection: close` on relayed responses, disabling downstream
    /// keep-alive. A throughput/latency tradeoff; off by default.
    pub force_close: bool,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            rewrite_host_header: false,
            force_close: false,
        }
    }
}

/// Outbound transport contracts.
///
/// All five knobs are explicit so no dispatch ever relies on implicit
/// platform defaults, which can hang indefinitely on a dead backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// TCP connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// TCP keep-alive probe interval in seconds.
    pub keep_alive_secs: u64,

    /// Additional budget for the TLS handshake on https backends, in
    /// seconds, on top of the connect timeout.
    pub tls_handshake_secs: u64,

    /// How long to wait for the backend's response headers, in seconds.
    pub response_header_secs: u64,

    /// Idle pooled connections are evicted after this many seconds.
    pub idle_secs: u64,

    /// Maximum idle pooled connections kept per backend host.
    pub max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            keep_alive_secs: 30,
            tls_handshake_secs: 10,
            response_header_secs: 30,
            idle_secs: 90,
            max_idle_per_host: 32,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level filter (trace, debug, info, warn, error). Overridden by
    /// `RUST_LOG` when set.
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub log_json: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
