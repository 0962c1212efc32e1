//! TCP listener binding.

use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener setup.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("invalid bind address `{0}`")]
    Address(String),

    #[error("failed to bind {0}: {1}")]
    Bind(SocketAddr, std::io::Error),
}

/// Bind the configured listen address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|_| ListenerError::Address(config.bind_address.clone()))?;

    TcpListener::bind(addr)
        .await
        .map_err(|e| ListenerError::Bind(addr, e))
}
