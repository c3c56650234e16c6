//! Plugin identifiers and backend endpoint paths.

/// Identifier of the Grafana app plugin this client belongs to.
pub const PLUGIN_ID: &str = "brade-dashboardtransporter-app";

/// Environment variable that injects a first-priority backend base URL.
pub const BACKEND_OVERRIDE_ENV: &str = "DASHBOARD_TRANSPORTER_BACKEND";

/// Environment variable holding the Grafana API token for the current-user lookup.
pub const GRAFANA_TOKEN_ENV: &str = "GRAFANA_TOKEN";

/// Relative path the backend is published under when it shares the Grafana host.
pub const DEFAULT_RELATIVE_BACKEND: &str = "/dashboard-transporter";

/// Local development backend.
pub const DEFAULT_LOCAL_BACKEND: &str = "http://localhost:8080";

/// Header the backend reads to segment calls by organization.
pub const ORG_ID_HEADER: &str = "X-Grafana-Org-Id";

/// Organization assumed when the caller's is unknown.
pub const DEFAULT_ORG_ID: u64 = 1;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Backend endpoint paths, relative to the resolved base URL.
pub mod endpoints {
    pub const HEALTH: &str = "/health";
    pub const ENVIRONMENTS: &str = "/environments";
    pub const DASHBOARDS: &str = "/dashboards";
    pub const FOLDERS: &str = "/folders";
    pub const IMPORT_BATCH: &str = "/dashboards/import/batch";
    pub const DEBUG_USER: &str = "/debug/user";
}
