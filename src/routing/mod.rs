//! Path and route building.
//!
//! # Data Flow
//! ```text
//! Caller path ("environments", "/dashboards?env=dev")
//!     → paths.rs (normalize to a single leading slash)
//!     → appended verbatim to the resolved backend base URL
//!
//! Plugin-internal routes:
//!     "import" → /a/<plugin id>/import
//!     "folders" → /api/plugin-proxy/<plugin id>/api/folders
//! ```
//!
//! # Design Decisions
//! - Pure string functions, no I/O
//! - Query values and path segments are percent-encoded; keys are trusted constants

pub mod paths;

pub use paths::{normalize_path, plugin_proxy_path, prefix_route, with_query, with_segments};
