//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (per-request counter + latency histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout, text or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; JSON format for production
//! - Metric updates are cheap and safe when no exporter is installed
//! - Request ID (x-request-id) correlates log lines across a request

pub mod logging;
pub mod metrics;
