//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and relative paths
//! - Validate value ranges (timeouts > 0, org id > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TransporterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::TransporterConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Check a loaded configuration for semantic errors.
pub fn validate_config(config: &TransporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(url) = &config.backend.override_url {
        if !url.trim().is_empty() {
            check_candidate("backend.override_url", url, &mut errors);
        }
    }
    if !config.backend.relative_path.trim().is_empty() {
        check_candidate("backend.relative_path", &config.backend.relative_path, &mut errors);
    }
    if !config.backend.local_url.trim().is_empty() {
        check_candidate("backend.local_url", &config.backend.local_url, &mut errors);
    }
    if let Some(origin) = &config.backend.origin {
        check_absolute("backend.origin", origin, &mut errors);
    }
    if let Some(url) = &config.grafana.url {
        check_absolute("grafana.url", url, &mut errors);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than zero"));
    }
    if config.timeouts.probe_secs == 0 {
        errors.push(ValidationError::new("timeouts.probe_secs", "must be greater than zero"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }
    if config.identity.org_id == 0 {
        errors.push(ValidationError::new("identity.org_id", "must be greater than zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A candidate is either an absolute http(s) URL or a path starting with `/`.
fn check_candidate(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let value = value.trim();
    if value.starts_with('/') {
        return;
    }
    check_absolute(field, value, errors);
}

fn check_absolute(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}' in '{}'", url.scheme(), value),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", value, e))),
    }
}
