//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply env overrides)
//!     → validation.rs (semantic checks, all errors collected)
//!     → ProxyConfig (validated, immutable)
//!     → passed by value into the server constructor
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no runtime reload
//! - All fields have defaults so a config file is optional
//! - Environment overrides (`PROXY_BACKENDS`, `PORT`) are the contract
//!   with the deployment environment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{
    ForwardingConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, TransportConfig,
};
