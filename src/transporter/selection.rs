//! Import selection state and the rules applied before a batch import.
//!
//! # Responsibilities
//! - Track source/target environments, target folder and selected dashboards
//! - Pick sensible defaults (first two environments, the "General" folder)
//! - Validate a selection into an `ImportBatchRequest`
//!
//! # Design Decisions
//! - Changing the source clears the dashboard selection; changing the target clears the folder
//! - Selected uids keep the order they were picked in
//! - `requestedBy` prefers an explicit value over the logged-in user and is omitted when blank

use thiserror::Error;

use crate::transporter::types::{Dashboard, Environment, Folder, ImportBatchRequest};

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("select both a source and a target environment")]
    MissingEnvironments,

    #[error("select a target folder")]
    MissingFolder,

    #[error("select at least one dashboard")]
    NoDashboards,
}

/// Caller choices for an import; anything left unset takes its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Source environment id (default: first listed).
    pub source: Option<String>,
    /// Target environment id (default: second listed).
    pub target: Option<String>,
    /// Target folder uid (default: General, else the first folder).
    pub folder: Option<String>,
    pub uids: Vec<String>,
    /// Select every dashboard of the source instead of `uids`.
    pub all: bool,
    pub requested_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSelection {
    source: Option<Environment>,
    target: Option<Environment>,
    folder: Option<Folder>,
    uids: Vec<String>,
    requested_by: Option<String>,
}

impl ImportSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// First environment as source, second as target.
    pub fn with_defaults(environments: &[Environment]) -> Self {
        Self {
            source: environments.first().cloned(),
            target: environments.get(1).cloned(),
            ..Self::default()
        }
    }

    pub fn source(&self) -> Option<&Environment> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&Environment> {
        self.target.as_ref()
    }

    pub fn folder(&self) -> Option<&Folder> {
        self.folder.as_ref()
    }

    pub fn selected(&self) -> &[String] {
        &self.uids
    }

    pub fn set_source(&mut self, source: Option<Environment>) {
        if self.source.as_ref().map(|e| &e.id) != source.as_ref().map(|e| &e.id) {
            self.uids.clear();
        }
        self.source = source;
    }

    pub fn set_target(&mut self, target: Option<Environment>) {
        if self.target.as_ref().map(|e| &e.id) != target.as_ref().map(|e| &e.id) {
            self.folder = None;
        }
        self.target = target;
    }

    pub fn set_folder(&mut self, folder: Option<Folder>) {
        self.folder = folder;
    }

    pub fn set_requested_by(&mut self, requested_by: Option<String>) {
        self.requested_by = requested_by;
    }

    /// Flip selection of `uid`; returns whether it is now selected.
    pub fn toggle(&mut self, uid: &str) -> bool {
        if let Some(pos) = self.uids.iter().position(|u| u == uid) {
            self.uids.remove(pos);
            false
        } else {
            self.uids.push(uid.to_string());
            true
        }
    }

    pub fn select(&mut self, uid: &str) {
        if !self.uids.iter().any(|u| u == uid) {
            self.uids.push(uid.to_string());
        }
    }

    /// Replace the selection with every listed dashboard.
    pub fn select_all(&mut self, dashboards: &[Dashboard]) {
        self.uids.clear();
        for dashboard in dashboards {
            self.select(&dashboard.uid);
        }
    }

    pub fn clear(&mut self) {
        self.uids.clear();
    }

    /// Validate the selection into a request body.
    ///
    /// `logged_user` is the platform user's login or email, possibly empty.
    pub fn build_request(&self, logged_user: &str) -> Result<ImportBatchRequest, SelectionError> {
        let (source, target) = match (&self.source, &self.target) {
            (Some(source), Some(target)) => (source, target),
            _ => return Err(SelectionError::MissingEnvironments),
        };
        let folder = self.folder.as_ref().ok_or(SelectionError::MissingFolder)?;
        if self.uids.is_empty() {
            return Err(SelectionError::NoDashboards);
        }

        Ok(ImportBatchRequest {
            source_env: source.id.clone(),
            target_env: target.id.clone(),
            folder_uid: folder.uid.clone(),
            uids: self.uids.clone(),
            requested_by: resolve_requested_by(self.requested_by.as_deref(), logged_user),
        })
    }
}

/// The folder preselected for a target: "General" if listed, else the first
/// one, else a synthetic "General".
pub fn default_folder(folders: &[Folder]) -> Folder {
    folders
        .iter()
        .find(|f| f.is_general())
        .or_else(|| folders.first())
        .cloned()
        .unwrap_or_else(Folder::general)
}

/// Explicit value if non-blank, else the logged-in user, else nothing.
pub fn resolve_requested_by(explicit: Option<&str>, logged_user: &str) -> Option<String> {
    let explicit = explicit.map(str::trim).unwrap_or_default();
    let chosen = if explicit.is_empty() {
        logged_user.trim()
    } else {
        explicit
    };
    if chosen.is_empty() {
        None
    } else {
        Some(chosen.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(id: &str) -> Environment {
        Environment {
            id: id.into(),
            name: format!("Grafana {}", id.to_uppercase()),
            url: format!("http://grafana-{id}"),
        }
    }

    fn folder(uid: &str, title: &str) -> Folder {
        Folder {
            uid: uid.into(),
            title: title.into(),
        }
    }

    fn dashboard(uid: &str) -> Dashboard {
        Dashboard {
            id: 1,
            uid: uid.into(),
            title: uid.to_uppercase(),
        }
    }

    #[test]
    fn test_defaults_pick_first_two_environments() {
        let selection = ImportSelection::with_defaults(&[env("dev"), env("hml"), env("prd")]);
        assert_eq!(selection.source().unwrap().id, "dev");
        assert_eq!(selection.target().unwrap().id, "hml");

        let single = ImportSelection::with_defaults(&[env("dev")]);
        assert!(single.target().is_none());
    }

    #[test]
    fn test_validation_order() {
        let mut selection = ImportSelection::new();
        assert_eq!(selection.build_request(""), Err(SelectionError::MissingEnvironments));

        selection.set_source(Some(env("dev")));
        selection.set_target(Some(env("hml")));
        assert_eq!(selection.build_request(""), Err(SelectionError::MissingFolder));

        selection.set_folder(Some(Folder::general()));
        assert_eq!(selection.build_request(""), Err(SelectionError::NoDashboards));

        selection.select("abc");
        let req = selection.build_request("").unwrap();
        assert_eq!(req.source_env, "dev");
        assert_eq!(req.target_env, "hml");
        assert_eq!(req.folder_uid, "");
        assert_eq!(req.uids, vec!["abc"]);
        assert_eq!(req.requested_by, None);
    }

    #[test]
    fn test_changing_environments_resets_dependents() {
        let mut selection = ImportSelection::with_defaults(&[env("dev"), env("hml")]);
        selection.select("abc");
        selection.set_folder(Some(folder("f1", "Ops")));

        selection.set_source(Some(env("dev")));
        assert_eq!(selection.selected(), ["abc"]);

        selection.set_source(Some(env("prd")));
        assert!(selection.selected().is_empty());

        selection.set_target(Some(env("prd")));
        assert!(selection.folder().is_none());
    }

    #[test]
    fn test_toggle_and_select_all_keep_order() {
        let mut selection = ImportSelection::new();
        assert!(selection.toggle("b"));
        assert!(selection.toggle("a"));
        assert!(!selection.toggle("b"));
        assert_eq!(selection.selected(), ["a"]);

        selection.select_all(&[dashboard("x"), dashboard("y"), dashboard("x")]);
        assert_eq!(selection.selected(), ["x", "y"]);

        selection.clear();
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn test_default_folder() {
        let folders = vec![folder("f1", "Ops"), folder("", "General")];
        assert!(default_folder(&folders).is_general());

        let folders = vec![folder("f1", "Ops"), folder("f2", "Infra")];
        assert_eq!(default_folder(&folders).uid, "f1");

        assert_eq!(default_folder(&[]), Folder::general());
    }

    #[test]
    fn test_requested_by_resolution() {
        assert_eq!(resolve_requested_by(Some("  alice,bob "), "carol"), Some("alice,bob".into()));
        assert_eq!(resolve_requested_by(Some("   "), " carol "), Some("carol".into()));
        assert_eq!(resolve_requested_by(None, ""), None);
    }
}
