//! Logged-in user lookup against the Grafana HTTP API.
//!
//! # Design Decisions
//! - Lookup failures never abort a workflow; the user is treated as anonymous
//! - Viewer accounts can read `/api/user`, so no elevated token is needed

use serde::Deserialize;

use crate::config::GrafanaConfig;

/// The subset of `GET /api/user` this client uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "orgId")]
    pub org_id: Option<u64>,
}

impl CurrentUser {
    /// Login, falling back to email; empty when neither is known.
    pub fn identity(&self) -> &str {
        if !self.login.is_empty() {
            &self.login
        } else {
            &self.email
        }
    }
}

#[derive(Debug, Clone)]
pub struct GrafanaUserClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GrafanaUserClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Build a client when a Grafana URL is configured.
    pub fn from_config(config: &GrafanaConfig, http: reqwest::Client) -> Option<Self> {
        config
            .url
            .as_deref()
            .map(|url| Self::new(http, url, config.token.clone()))
    }

    /// Fetch the logged-in user, or `None` if the lookup fails for any reason.
    pub async fn current_user(&self) -> Option<CurrentUser> {
        let url = format!("{}/api/user", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Current user lookup failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(url = %url, status = %response.status(), "Current user lookup rejected");
            return None;
        }

        match response.json::<CurrentUser>().await {
            Ok(user) => {
                tracing::debug!(login = %user.login, org_id = ?user.org_id, "Current user resolved");
                Some(user)
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Current user response malformed");
                None
            }
        }
    }
}
