//! Candidate backend base URLs.
//!
//! # Responsibilities
//! - Build the ordered candidate list from configuration
//! - Normalize entries (trim, drop blanks, strip trailing slashes)
//! - Turn relative candidates into absolute base URLs
//!
//! # Design Decisions
//! - Order is preserved; duplicates are kept so diagnostics list exactly what was tried
//! - A relative candidate without an origin is a probe failure, not a config error

use thiserror::Error;
use url::Url;

use crate::config::BackendConfig;

/// Why a candidate could not be turned into a contactable URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CandidateError {
    #[error("relative candidate '{0}' needs an origin")]
    NoOrigin(String),

    #[error("invalid candidate '{candidate}': {source}")]
    Invalid {
        candidate: String,
        source: url::ParseError,
    },
}

/// Ordered, normalized list of backend base URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendCandidates(Vec<String>);

impl BackendCandidates {
    /// Normalize raw entries, keeping their order.
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates = raw
            .into_iter()
            .map(|c| c.as_ref().trim().trim_end_matches('/').to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Self(candidates)
    }

    /// Override first, then the relative path, then the local development URL.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new([
            config.override_url.as_deref().unwrap_or_default(),
            config.relative_path.as_str(),
            config.local_url.as_str(),
        ])
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Resolve `candidate` into an absolute base URL without a trailing slash.
///
/// Absolute candidates are returned as written once they parse.
pub fn absolute_base(candidate: &str, origin: Option<&Url>) -> Result<String, CandidateError> {
    if candidate.starts_with('/') {
        let origin = origin.ok_or_else(|| CandidateError::NoOrigin(candidate.to_string()))?;
        let joined = origin.join(candidate).map_err(|source| CandidateError::Invalid {
            candidate: candidate.to_string(),
            source,
        })?;
        return Ok(joined.as_str().trim_end_matches('/').to_string());
    }

    Url::parse(candidate).map_err(|source| CandidateError::Invalid {
        candidate: candidate.to_string(),
        source,
    })?;
    Ok(candidate.to_string())
}
