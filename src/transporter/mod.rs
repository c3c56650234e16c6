//! Dashboard transport domain.
//!
//! # Data Flow
//! ```text
//! list_environments → ImportSelection::with_defaults (source, target)
//! source changes    → list_dashboards(source) → select / toggle / select_all
//! target changes    → list_folders(target)    → default_folder
//! import            → build_request (validate) → POST /dashboards/import/batch
//!                   → ImportResponse (per-uid ok | warning | error, or summary)
//! ```
//!
//! # Design Decisions
//! - Failures name the operation and environment they belong to
//! - Per-uid outcomes are kept as-is; callers decide how to present a mixed result

pub mod api;
pub mod selection;
pub mod types;

pub use api::TransporterApi;
pub use selection::{
    default_folder, resolve_requested_by, ImportOptions, ImportSelection, SelectionError,
};
pub use types::{
    Dashboard, Environment, Folder, ImportBatchRequest, ImportResponse, ImportResult,
    ImportStatus, ImportTally, TransporterError,
};
