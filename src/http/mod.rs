//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, per-request handler)
//!     → request.rs (inject x-request-id)
//!     → [backend pool picks endpoint]
//!     → proxy.rs (rewrite URI/headers, relay response)
//!     → transport.rs (pooled client with explicit timeouts)
//!     → Stream response to client
//! ```
//!
//! # Design Decisions
//! - Responses are streamed, never buffered wholly in memory
//! - A failed dispatch is a single 502 to the caller; no retries
//! - Hop-by-hop headers are stripped in both directions

pub mod proxy;
pub mod request;
pub mod server;
pub mod transport;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
