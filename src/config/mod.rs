//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: backend URL, Grafana token)
//!     → validation.rs (semantic checks)
//!     → TransporterConfig (validated, immutable)
//!     → used once at startup to build the locator and clients
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - The runtime backend override is normalized here, before any probing
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, ConfigError};
pub use schema::{
    BackendConfig, GrafanaConfig, IdentityConfig, ObservabilityConfig, TimeoutConfig,
    TransporterConfig,
};
pub use validation::ValidationError;
