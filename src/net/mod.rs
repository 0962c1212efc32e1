//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Configured bind address
//!     → listener.rs (parse, bind, fail fast)
//!     → Hand off to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - Bind failures are fatal: the process never serves traffic it cannot
//!   actually accept

pub mod listener;

pub use listener::ListenerError;
