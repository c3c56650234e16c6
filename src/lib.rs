//! Dashboard Transporter client library.
//!
//! Locates the dashboard-transporter backend among a list of candidate base
//! URLs and talks to it with typed JSON calls: list environments, dashboards
//! and folders, and copy dashboards between environments in one batch.

pub mod config;
pub mod constants;
pub mod grafana;
pub mod health;
pub mod http;
pub mod observability;
pub mod routing;
pub mod transporter;

pub use config::TransporterConfig;
pub use health::BackendLocator;
pub use http::{ClientError, TransporterClient};
pub use transporter::TransporterApi;
