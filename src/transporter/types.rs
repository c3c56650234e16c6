//! Domain records exchanged with the transporter backend, and their errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::http::ClientError;
use crate::transporter::selection::SelectionError;

/// A named Grafana deployment dashboards are copied between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl Environment {
    /// Selector label, e.g. `Grafana DEV (dev)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: i64,
    pub uid: String,
    pub title: String,
}

/// Dashboard folder in a target environment. The empty uid is "General".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
}

impl Folder {
    pub fn general() -> Self {
        Self {
            uid: String::new(),
            title: "General".to_string(),
        }
    }

    pub fn is_general(&self) -> bool {
        self.uid.is_empty()
    }

    /// Title to show; untitled folders display as "General".
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            "General"
        } else {
            &self.title
        }
    }
}

/// Body of `POST /dashboards/import/batch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatchRequest {
    pub source_env: String,
    pub target_env: String,
    pub folder_uid: String,
    pub uids: Vec<String>,
    /// Login or email (comma-separated for several) granted access on the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Ok,
    Warning,
    Error,
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImportStatus::Ok => "ok",
            ImportStatus::Warning => "warning",
            ImportStatus::Error => "error",
        };
        f.pad(s)
    }
}

/// Outcome of importing one dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub source_uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_uid: Option<String>,
    pub status: ImportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of a batch import.
///
/// Current backends answer with one result per uid; older ones with a single
/// summary object (possibly empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportResponse {
    PerUid(Vec<ImportResult>),
    Summary(Map<String, Value>),
}

/// Per-status counts of a batch import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportTally {
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
}

impl ImportTally {
    pub fn total(&self) -> usize {
        self.ok + self.warning + self.error
    }
}

impl fmt::Display for ImportTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ok, {} warning, {} error", self.ok, self.warning, self.error)
    }
}

impl ImportResponse {
    /// Per-uid results; empty for a summary response.
    pub fn results(&self) -> &[ImportResult] {
        match self {
            ImportResponse::PerUid(results) => results,
            ImportResponse::Summary(_) => &[],
        }
    }

    pub fn tally(&self) -> ImportTally {
        let mut tally = ImportTally::default();
        for result in self.results() {
            match result.status {
                ImportStatus::Ok => tally.ok += 1,
                ImportStatus::Warning => tally.warning += 1,
                ImportStatus::Error => tally.error += 1,
            }
        }
        tally
    }

    /// True when results carry more than one distinct status.
    pub fn is_mixed(&self) -> bool {
        let tally = self.tally();
        [tally.ok, tally.warning, tally.error]
            .iter()
            .filter(|n| **n > 0)
            .count()
            > 1
    }

    pub fn has_errors(&self) -> bool {
        self.tally().error > 0
    }

    /// Results that did not import cleanly.
    pub fn failures(&self) -> impl Iterator<Item = &ImportResult> {
        self.results()
            .iter()
            .filter(|r| r.status != ImportStatus::Ok)
    }

    /// The summary's `message` field, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ImportResponse::Summary(map) => map.get("message").and_then(Value::as_str),
            ImportResponse::PerUid(_) => None,
        }
    }
}

/// Errors of domain operations, scoped to the operation that failed.
#[derive(Debug, Error)]
pub enum TransporterError {
    #[error("failed to load environments: {0}")]
    Environments(#[source] ClientError),

    #[error("failed to load dashboards for environment \"{env}\": {source}")]
    Dashboards { env: String, source: ClientError },

    #[error("failed to load folders for environment \"{env}\": {source}")]
    Folders { env: String, source: ClientError },

    #[error("batch import failed: {0}")]
    Import(#[source] ClientError),

    #[error("user lookup failed: {0}")]
    DebugUser(#[source] ClientError),

    #[error("unknown environment \"{id}\" (known: {})", .known.join(", "))]
    UnknownEnvironment { id: String, known: Vec<String> },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl TransporterError {
    /// The underlying client error, if the failure came from the backend call.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            TransporterError::Environments(e)
            | TransporterError::Import(e)
            | TransporterError::DebugUser(e) => Some(e),
            TransporterError::Dashboards { source, .. } | TransporterError::Folders { source, .. } => {
                Some(source)
            }
            TransporterError::UnknownEnvironment { .. } | TransporterError::Selection(_) => None,
        }
    }
}
