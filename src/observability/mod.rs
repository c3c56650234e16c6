//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! locator / client / api produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (probe and request counters, latency histogram)
//!
//! Consumers:
//!     → stderr (human-readable or JSON lines)
//!     → whatever `metrics` recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so command output on stdout stays machine-readable
//! - Request ID is logged with every backend call
//! - Metrics are cheap and inert without a recorder

pub mod logging;
pub mod metrics;
