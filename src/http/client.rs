//! Typed JSON client for the transporter backend.
//!
//! # Responsibilities
//! - Resolve the backend through the shared locator
//! - Normalize paths and build request URLs
//! - Encode request bodies and decode responses as JSON
//! - Turn non-2xx responses into `ClientError::Http` with extracted text
//!
//! # Design Decisions
//! - No retries; every error propagates to the caller
//! - Each request carries a fresh `X-Request-Id` for log correlation
//! - The organization header is attached only when identity forwarding is enabled

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::{IdentityConfig, TimeoutConfig};
use crate::constants::{ORG_ID_HEADER, REQUEST_ID_HEADER};
use crate::health::BackendLocator;
use crate::http::error::{ClientError, ClientResult};
use crate::http::error_body::ErrorBody;
use crate::observability::metrics;
use crate::routing::normalize_path;

/// Build the shared reqwest client with configured timeouts.
pub fn build_http_client(timeouts: &TimeoutConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.request_secs))
        .user_agent(concat!("dashboard-transporter/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// GET/POST client bound to the located backend.
#[derive(Debug, Clone)]
pub struct TransporterClient {
    http: reqwest::Client,
    locator: Arc<BackendLocator>,
    org_id: Option<u64>,
}

impl TransporterClient {
    pub fn new(http: reqwest::Client, locator: Arc<BackendLocator>) -> Self {
        Self {
            http,
            locator,
            org_id: None,
        }
    }

    /// Attach the organization header to every request.
    pub fn with_org_id(mut self, org_id: u64) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Apply the identity forwarding policy.
    ///
    /// When forwarding is enabled the current user's organization is used,
    /// falling back to the configured one.
    pub fn with_identity(self, identity: &IdentityConfig, user_org_id: Option<u64>) -> Self {
        if identity.forward_org_id {
            let org_id = user_org_id.unwrap_or(identity.org_id);
            self.with_org_id(org_id)
        } else {
            self
        }
    }

    pub fn locator(&self) -> &Arc<BackendLocator> {
        &self.locator
    }

    pub fn org_id(&self) -> Option<u64> {
        self.org_id
    }

    /// Full request URL for `path` on the resolved backend.
    pub async fn url_for(&self, path: &str) -> ClientResult<String> {
        let base = self.locator.resolve().await?;
        Ok(format!("{}{}", base, normalize_path(path)))
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<T>(&self, path: &str) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(path).await?;
        let text = self.execute(Method::GET, &url, None).await?;
        decode(Method::GET, url, &text)
    }

    /// POST `body` as JSON to `path` and decode the response.
    ///
    /// An empty success body decodes as `{}`.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        let url = self.url_for(path).await?;
        let text = self.execute(Method::POST, &url, Some(payload)).await?;

        if text.trim().is_empty() {
            decode(Method::POST, url, "{}")
        } else {
            decode(Method::POST, url, &text)
        }
    }

    /// Send one request and return the body text of a 2xx response.
    async fn execute(&self, method: Method, url: &str, body: Option<Vec<u8>>) -> ClientResult<String> {
        let start = Instant::now();
        let request_id = Uuid::new_v4();

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .header(ACCEPT, "application/json");
        if let Some(org_id) = self.org_id {
            request = request.header(ORG_ID_HEADER, org_id.to_string());
        }
        if let Some(payload) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let transport = |source: reqwest::Error| {
            metrics::record_request(method.as_str(), None, start);
            tracing::warn!(%method, url = %url, request_id = %request_id, error = %source, "Backend request failed");
            ClientError::Transport {
                method: method.clone(),
                url: url.to_string(),
                source,
            }
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;

        metrics::record_request(method.as_str(), Some(status.as_u16()), start);
        tracing::debug!(
            %method,
            url = %url,
            status = status.as_u16(),
            request_id = %request_id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Backend request completed"
        );

        if !status.is_success() {
            let body = ErrorBody::decode(&text);
            tracing::warn!(%method, url = %url, status = status.as_u16(), message = %body, "Backend rejected request");
            return Err(ClientError::Http {
                method,
                url: url.to_string(),
                status,
                body,
            });
        }

        Ok(text)
    }
}

fn decode<T: DeserializeOwned>(method: Method, url: String, text: &str) -> ClientResult<T> {
    serde_json::from_str(text).map_err(|source| ClientError::Decode { method, url, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::BackendCandidates;

    fn client() -> TransporterClient {
        let http = reqwest::Client::new();
        let locator = BackendLocator::new(
            BackendCandidates::default(),
            None,
            http.clone(),
            Duration::from_secs(1),
        );
        TransporterClient::new(http, Arc::new(locator))
    }

    #[test]
    fn test_identity_policy() {
        let disabled = IdentityConfig::default();
        assert_eq!(client().with_identity(&disabled, Some(7)).org_id(), None);

        let enabled = IdentityConfig {
            forward_org_id: true,
            org_id: 1,
        };
        assert_eq!(client().with_identity(&enabled, Some(7)).org_id(), Some(7));
        assert_eq!(client().with_identity(&enabled, None).org_id(), Some(1));
    }

    #[test]
    fn test_decode_error_carries_request() {
        let err = decode::<Vec<String>>(Method::GET, "http://b/environments".into(), "<html>")
            .unwrap_err();
        match err {
            ClientError::Decode { method, url, .. } => {
                assert_eq!(method, Method::GET);
                assert_eq!(url, "http://b/environments");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_encode_error_before_resolution() {
        use std::collections::HashMap;
        // Non-string map keys cannot be represented in JSON.
        let mut body = HashMap::new();
        body.insert((1, 2), "x");
        let err = client().post::<_, serde_json::Value>("/x", &body).await.unwrap_err();
        assert!(matches!(err, ClientError::Encode(_)));
    }
}
