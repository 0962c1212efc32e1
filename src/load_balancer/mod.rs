//! Backend pool and round-robin selection.
//!
//! # Data Flow
//! ```text
//! Config backend list (Vec<String>)
//!     → endpoint.rs (parse into immutable Endpoints)
//!     → pool.rs (ordered pool + atomic cursor)
//!     → select_next() per inbound request
//!     → Arc<Endpoint> handed to the forwarding pipeline
//! ```
//!
//! # Design Decisions
//! - Endpoints are parsed once at startup and never mutated
//! - Empty or malformed backend lists fail construction, not selection
//! - Selection is a single atomic fetch-and-add; no locks
//! - The cursor lives on the pool instance, not in a global

pub mod endpoint;
pub mod pool;

pub use endpoint::{Endpoint, EndpointError};
pub use pool::{BackendPool, PoolError};
