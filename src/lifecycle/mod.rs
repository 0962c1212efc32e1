//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Bind → Serve
//!
//! Shutdown:
//!     SIGTERM/SIGINT (signals.rs) → Shutdown::trigger (shutdown.rs)
//!     → server stops accepting and drains
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal with a non-zero exit
//! - Shutdown is a broadcast so tests can trigger it without signals

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
