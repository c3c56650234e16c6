//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOCAL_BACKEND, DEFAULT_ORG_ID, DEFAULT_RELATIVE_BACKEND};

/// Root configuration for the transporter client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TransporterConfig {
    /// Backend discovery settings.
    pub backend: BackendConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Caller-identity forwarding.
    pub identity: IdentityConfig,

    /// Grafana host used for the current-user lookup.
    pub grafana: GrafanaConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Candidate backend base URLs, probed in declaration order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Highest-priority base URL, usually injected at runtime.
    pub override_url: Option<String>,

    /// Path the backend is published under on the Grafana host.
    pub relative_path: String,

    /// Local development backend.
    pub local_url: String,

    /// Origin used to resolve relative candidates (e.g. "https://grafana.example.com").
    pub origin: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            override_url: None,
            relative_path: DEFAULT_RELATIVE_BACKEND.to_string(),
            local_url: DEFAULT_LOCAL_BACKEND.to_string(),
            origin: None,
        }
    }
}

/// Timeout configuration for outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Per-candidate health probe timeout in seconds.
    pub probe_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            probe_secs: 5,
            request_secs: 120,
        }
    }
}

/// Organization header forwarding.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Attach the organization header to every backend request.
    pub forward_org_id: bool,

    /// Organization used when the current user's is unknown.
    pub org_id: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            forward_org_id: false,
            org_id: DEFAULT_ORG_ID,
        }
    }
}

/// Grafana API access for the current-user lookup.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GrafanaConfig {
    /// Grafana base URL. Lookup is skipped when unset.
    pub url: Option<String>,

    /// Bearer token (service account or API key).
    pub token: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransporterConfig::default();
        assert_eq!(config.backend.relative_path, "/dashboard-transporter");
        assert_eq!(config.backend.local_url, "http://localhost:8080");
        assert!(config.backend.override_url.is_none());
        assert!(!config.identity.forward_org_id);
        assert_eq!(config.identity.org_id, 1);
    }

    #[test]
    fn test_partial_toml() {
        let config: TransporterConfig = toml::from_str(
            r#"
            [backend]
            origin = "https://grafana.example.com"

            [identity]
            forward_org_id = true
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.origin.as_deref(), Some("https://grafana.example.com"));
        assert_eq!(config.backend.local_url, "http://localhost:8080");
        assert!(config.identity.forward_org_id);
        assert_eq!(config.identity.org_id, 1);
        assert_eq!(config.timeouts.probe_secs, 5);
    }
}
