//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::TransporterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::constants::{BACKEND_OVERRIDE_ENV, GRAFANA_TOKEN_ENV};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<TransporterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TransporterConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the file at `path` (or defaults), apply process environment
/// overrides, and validate the result.
pub fn load(path: Option<&Path>) -> Result<TransporterConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => TransporterConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// A non-blank backend override replaces any file-provided one; blank values
/// are ignored.
pub fn apply_env_overrides<F>(config: &mut TransporterConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = normalize_override(lookup(BACKEND_OVERRIDE_ENV)) {
        config.backend.override_url = Some(url);
    } else {
        config.backend.override_url = normalize_override(config.backend.override_url.take());
    }

    if let Some(token) = lookup(GRAFANA_TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
        config.grafana.token = Some(token.trim().to_string());
    }
}

/// Trim an injected override and drop it when blank.
pub fn normalize_override(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_override_wins() {
        let vars = env(&[(BACKEND_OVERRIDE_ENV, "  https://transporter.internal/  ")]);
        let mut config = TransporterConfig::default();
        config.backend.override_url = Some("http://from-file".into());

        apply_env_overrides(&mut config, |k| vars.get(k).cloned());
        assert_eq!(
            config.backend.override_url.as_deref(),
            Some("https://transporter.internal/")
        );
    }

    #[test]
    fn test_blank_override_ignored() {
        let vars = env(&[(BACKEND_OVERRIDE_ENV, "   ")]);
        let mut config = TransporterConfig::default();
        config.backend.override_url = Some("  ".into());

        apply_env_overrides(&mut config, |k| vars.get(k).cloned());
        assert!(config.backend.override_url.is_none());
    }

    #[test]
    fn test_grafana_token_from_env() {
        let vars = env(&[(GRAFANA_TOKEN_ENV, "glsa_abc")]);
        let mut config = TransporterConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).cloned());
        assert_eq!(config.grafana.token.as_deref(), Some("glsa_abc"));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = std::env::temp_dir().join(format!("transporter-cfg-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("transporter.toml");
        fs::write(
            &path,
            r#"
            [backend]
            override_url = "http://10.0.0.5:8080"

            [timeouts]
            probe_secs = 2
            "#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.backend.override_url.as_deref(), Some("http://10.0.0.5:8080"));
        assert_eq!(config.timeouts.probe_secs, 2);

        fs::write(&path, "[timeouts]\nprobe_secs = 0\n").unwrap();
        match load_config(&path) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors[0].field, "timeouts.probe_secs"),
            other => panic!("expected validation error, got {:?}", other),
        }

        let _ = fs::remove_dir_all(&dir);
    }
}
