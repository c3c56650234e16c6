//! Backend discovery.
//!
//! # Responsibilities
//! - Probe candidate base URLs in order with `GET <base>/health`
//! - Memoize the first one answering 2xx
//! - Report every attempted candidate when none answers
//!
//! # Design Decisions
//! - Probing is sequential and stops at the first healthy candidate
//! - The resolved URL is never re-probed for the life of the locator
//! - Concurrent first callers share one in-flight probe sequence
//! - A failed resolution leaves nothing cached; the next call probes again

use std::time::Duration;

use tokio::sync::OnceCell;
use tokio::time;
use url::Url;

use crate::config::TransporterConfig;
use crate::constants::endpoints;
use crate::health::candidates::{absolute_base, BackendCandidates};
use crate::http::error::{ClientError, ClientResult};
use crate::observability::metrics::{self, ProbeOutcome};

/// Finds and remembers which candidate base URL serves the backend.
#[derive(Debug)]
pub struct BackendLocator {
    candidates: BackendCandidates,
    origin: Option<Url>,
    http: reqwest::Client,
    probe_timeout: Duration,
    resolved: OnceCell<String>,
}

impl BackendLocator {
    /// Create a locator over an explicit candidate list.
    pub fn new(
        candidates: BackendCandidates,
        origin: Option<Url>,
        http: reqwest::Client,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            candidates,
            origin,
            http,
            probe_timeout,
            resolved: OnceCell::new(),
        }
    }

    /// Create a locator from validated configuration.
    pub fn from_config(config: &TransporterConfig, http: reqwest::Client) -> Result<Self, url::ParseError> {
        let origin = config.backend.origin.as_deref().map(Url::parse).transpose()?;
        Ok(Self::new(
            BackendCandidates::from_config(&config.backend),
            origin,
            http,
            Duration::from_secs(config.timeouts.probe_secs),
        ))
    }

    /// Return the backend base URL, probing candidates on first use.
    pub async fn resolve(&self) -> ClientResult<&str> {
        self.resolved
            .get_or_try_init(|| self.probe_all())
            .await
            .map(String::as_str)
    }

    /// The memoized base URL, if resolution already succeeded.
    pub fn resolved(&self) -> Option<&str> {
        self.resolved.get().map(String::as_str)
    }

    pub fn candidates(&self) -> &BackendCandidates {
        &self.candidates
    }

    async fn probe_all(&self) -> ClientResult<String> {
        for candidate in self.candidates.iter() {
            let base = match absolute_base(candidate, self.origin.as_ref()) {
                Ok(base) => base,
                Err(e) => {
                    tracing::warn!(candidate = %candidate, error = %e, "Skipping backend candidate");
                    metrics::record_probe(ProbeOutcome::Skipped);
                    continue;
                }
            };

            let outcome = self.probe(&base).await;
            metrics::record_probe(outcome);

            if outcome == ProbeOutcome::Up {
                tracing::info!(candidate = %candidate, base_url = %base, "Backend resolved");
                metrics::record_resolution(true);
                return Ok(base);
            }
        }

        tracing::error!(
            candidates = ?self.candidates.as_slice(),
            "No backend candidate answered the health probe"
        );
        metrics::record_resolution(false);
        Err(ClientError::BackendUnreachable {
            candidates: self.candidates.as_slice().to_vec(),
        })
    }

    async fn probe(&self, base: &str) -> ProbeOutcome {
        let url = format!("{}{}", base, endpoints::HEALTH);
        tracing::debug!(url = %url, "Probing backend candidate");

        let response_future = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, "dashboard-transporter-probe")
            .send();

        match time::timeout(self.probe_timeout, response_future).await {
            Ok(Ok(response)) => {
                if response.status().is_success() {
                    ProbeOutcome::Up
                } else {
                    tracing::warn!(url = %url, status = %response.status(), "Health probe failed: non-success status");
                    ProbeOutcome::BadStatus
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(url = %url, error = %e, "Health probe failed: connection error");
                ProbeOutcome::Unreachable
            }
            Err(_) => {
                tracing::warn!(url = %url, "Health probe failed: timeout");
                ProbeOutcome::Timeout
            }
        }
    }
}
