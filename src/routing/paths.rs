//! Path normalization and plugin route helpers.

use crate::constants::PLUGIN_ID;

/// Ensure `path` starts with exactly one `/`.
///
/// `"environments"`, `"/environments"` and `"//environments"` all become
/// `"/environments"`. The empty path becomes `"/"`.
pub fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Prefix an app-internal route with the plugin's mount point.
pub fn prefix_route(route: &str) -> String {
    format!("/a/{}/{}", PLUGIN_ID, route.trim_start_matches('/'))
}

/// Build the Grafana plugin-proxy path for a backend route.
///
/// The plugin declares a single proxied route named `api`, so every backend
/// path is nested below it.
pub fn plugin_proxy_path(plugin_id: &str, path: &str) -> String {
    format!(
        "/api/plugin-proxy/{}/api/{}",
        plugin_id,
        path.trim_start_matches('/')
    )
}

/// Append a single url-encoded query parameter to `path`.
pub fn with_query(path: &str, key: &str, value: &str) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", path, sep, key, urlencoding::encode(value))
}

/// Append url-encoded path segments to `prefix`.
pub fn with_segments(prefix: &str, segments: &[&str]) -> String {
    let mut path = prefix.trim_end_matches('/').to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("environments"), "/environments");
        assert_eq!(normalize_path("/environments"), "/environments");
        assert_eq!(normalize_path("//environments"), "/environments");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_prefix_route() {
        assert_eq!(prefix_route("import"), "/a/brade-dashboardtransporter-app/import");
        assert_eq!(prefix_route("/import"), "/a/brade-dashboardtransporter-app/import");
    }

    #[test]
    fn test_plugin_proxy_path() {
        assert_eq!(
            plugin_proxy_path(PLUGIN_ID, "/folders"),
            "/api/plugin-proxy/brade-dashboardtransporter-app/api/folders"
        );
        assert_eq!(
            plugin_proxy_path("other-app", "environments"),
            "/api/plugin-proxy/other-app/api/environments"
        );
    }

    #[test]
    fn test_with_query_encodes_value() {
        assert_eq!(with_query("/dashboards", "env", "dev"), "/dashboards?env=dev");
        assert_eq!(
            with_query("/folders", "env", "a b&c"),
            "/folders?env=a%20b%26c"
        );
        assert_eq!(with_query("/x?a=1", "env", "hml"), "/x?a=1&env=hml");
    }

    #[test]
    fn test_with_segments() {
        assert_eq!(
            with_segments("/debug/user", &["hml", "jane.doe@example.com"]),
            "/debug/user/hml/jane.doe%40example.com"
        );
        assert_eq!(with_segments("/debug/user/", &["a b"]), "/debug/user/a%20b");
    }
}
