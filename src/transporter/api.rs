//! Typed calls to the transporter backend endpoints.

use serde_json::Value;

use crate::constants::endpoints;
use crate::http::TransporterClient;
use crate::routing::{with_query, with_segments};
use crate::transporter::selection::{default_folder, ImportOptions, ImportSelection};
use crate::transporter::types::{
    Dashboard, Environment, Folder, ImportBatchRequest, ImportResponse, TransporterError,
};

/// Domain operations layered on the typed client.
#[derive(Debug, Clone)]
pub struct TransporterApi {
    client: TransporterClient,
}

impl TransporterApi {
    pub fn new(client: TransporterClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &TransporterClient {
        &self.client
    }

    pub async fn list_environments(&self) -> Result<Vec<Environment>, TransporterError> {
        self.client
            .get(endpoints::ENVIRONMENTS)
            .await
            .map_err(TransporterError::Environments)
    }

    /// Dashboards available in `env`.
    pub async fn list_dashboards(&self, env: &str) -> Result<Vec<Dashboard>, TransporterError> {
        let path = with_query(endpoints::DASHBOARDS, "env", env);
        self.client
            .get(&path)
            .await
            .map_err(|source| TransporterError::Dashboards {
                env: env.to_string(),
                source,
            })
    }

    /// Folders of `env`, flattened.
    pub async fn list_folders(&self, env: &str) -> Result<Vec<Folder>, TransporterError> {
        let path = with_query(endpoints::FOLDERS, "env", env);
        self.client
            .get(&path)
            .await
            .map_err(|source| TransporterError::Folders {
                env: env.to_string(),
                source,
            })
    }

    pub async fn import_batch(
        &self,
        request: &ImportBatchRequest,
    ) -> Result<ImportResponse, TransporterError> {
        tracing::info!(
            source_env = %request.source_env,
            target_env = %request.target_env,
            folder_uid = %request.folder_uid,
            count = request.uids.len(),
            "Requesting batch import"
        );

        let response: ImportResponse = self
            .client
            .post(endpoints::IMPORT_BATCH, request)
            .await
            .map_err(TransporterError::Import)?;

        let tally = response.tally();
        if tally.error > 0 || tally.warning > 0 {
            tracing::warn!(%tally, "Batch import finished with problems");
        } else {
            tracing::info!(%tally, "Batch import finished");
        }
        Ok(response)
    }

    /// Build a selection from `options`, filling in defaults from the backend.
    ///
    /// Environment overrides are applied first, then the dashboard choice
    /// (every source dashboard, or the listed uids), then the folder.
    pub async fn prepare_import(
        &self,
        options: &ImportOptions,
    ) -> Result<ImportSelection, TransporterError> {
        let envs = self.list_environments().await?;
        let mut selection = ImportSelection::with_defaults(&envs);
        if let Some(id) = &options.source {
            selection.set_source(Some(find_environment(&envs, id)?));
        }
        if let Some(id) = &options.target {
            selection.set_target(Some(find_environment(&envs, id)?));
        }

        if options.all {
            if let Some(source) = selection.source().cloned() {
                let dashboards = self.list_dashboards(&source.id).await?;
                selection.select_all(&dashboards);
            }
        } else {
            for uid in &options.uids {
                selection.select(uid);
            }
        }

        let folder = match (&options.folder, selection.target().cloned()) {
            (Some(uid), _) => Some(Folder {
                uid: uid.clone(),
                title: String::new(),
            }),
            (None, Some(target)) => Some(default_folder(&self.list_folders(&target.id).await?)),
            (None, None) => None,
        };
        selection.set_folder(folder);
        selection.set_requested_by(options.requested_by.clone());
        Ok(selection)
    }

    /// Validate `selection` and submit it.
    pub async fn import_selection(
        &self,
        selection: &ImportSelection,
        logged_user: &str,
    ) -> Result<ImportResponse, TransporterError> {
        let request = selection.build_request(logged_user)?;
        self.import_batch(&request).await
    }

    /// Backend's view of `username` in `env` (diagnostics).
    pub async fn debug_user(&self, env: &str, username: &str) -> Result<Value, TransporterError> {
        let path = with_segments(endpoints::DEBUG_USER, &[env, username]);
        self.client
            .get(&path)
            .await
            .map_err(TransporterError::DebugUser)
    }
}

fn find_environment(envs: &[Environment], id: &str) -> Result<Environment, TransporterError> {
    envs.iter()
        .find(|e| e.id == id)
        .cloned()
        .ok_or_else(|| TransporterError::UnknownEnvironment {
            id: id.to_string(),
            known: envs.iter().map(|e| e.id.clone()).collect(),
        })
}
