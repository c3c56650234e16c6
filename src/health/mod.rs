//! Backend discovery subsystem.
//!
//! # Data Flow
//! ```text
//! BackendConfig (override, relative path, local URL)
//!     → candidates.rs (ordered, normalized list)
//!     → locator.rs (probe GET <base>/health in order)
//!     → first 2xx → memoized base URL (shared via Arc)
//!     → none     → BackendUnreachable listing every candidate
//! ```
//!
//! # Design Decisions
//! - Discovery runs once per locator, on first use
//! - Probe failures are logged and skipped, never surfaced individually
//! - Relative candidates need a configured origin to be probed

pub mod candidates;
pub mod locator;

pub use candidates::BackendCandidates;
pub use locator::BackendLocator;
