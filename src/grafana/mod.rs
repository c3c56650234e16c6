//! Grafana host integration.
//!
//! Only the current-user lookup is needed: it supplies the default
//! `requestedBy` for imports and the organization forwarded to the backend.

pub mod user;

pub use user::{CurrentUser, GrafanaUserClient};
