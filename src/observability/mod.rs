//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events, per-connection spans)
//!     → metrics.rs (counters and gauges)
//!
//! Consumers:
//!     → stdout via the fmt layer
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of formatted strings
//! - Connection id and peer address flow through every handler event
//! - Metrics are recorded unconditionally and cost nothing without an exporter

pub mod logging;
pub mod metrics;
