//! SyncEngine implementation
//!
//! The SyncEngine binds a loaded [`Project`] to a [`ScriptService`] and
//! runs the collect → plan → transfer → apply flows for push and pull.

use std::sync::Arc;

use scriptsync_fs::NormalizedPath;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::pull::{PrunePlan, plan_prune, plan_pull};
use super::push::plan_push;
use super::status::{SyncClassification, classify};
use super::watch::{ChangeEvent, ContentWatcher, watch_content_dir};
use crate::config::Project;
use crate::files::{ProjectFile, collect::walk_files};
use crate::remote::{
    Aggregated, Deployment, PageOptions, ScriptService, ScriptSummary, Version, aggregate,
    map_to_local,
};
use crate::{Error, Result};

/// Outcome of a successful push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReport {
    /// Remote names in the order they were sent
    pub pushed: Vec<String>,
}

/// Outcome of a pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullReport {
    /// Content-relative paths written
    pub written: Vec<NormalizedPath>,
    /// Remote names of empty files that were not written
    pub placeholders: Vec<String>,
    /// Files tracked before the pull that the remote no longer has
    pub prune: PrunePlan,
    /// Written paths the local ignore rules will not collect again,
    /// such as files under a hidden directory no negation names
    pub untracked: Vec<NormalizedPath>,
}

/// Engine for synchronizing a project with its remote.
pub struct SyncEngine {
    project: Project,
    remote: Arc<dyn ScriptService>,
    paging: PageOptions,
}

impl SyncEngine {
    pub fn new(project: Project, remote: Arc<dyn ScriptService>) -> Self {
        Self {
            project,
            remote,
            paging: PageOptions::default(),
        }
    }

    /// Override page size and ceiling for listing calls.
    pub fn with_page_options(mut self, paging: PageOptions) -> Self {
        self.paging = paging;
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Collect the tracked local files in push order.
    pub async fn collect_local_files(&self) -> Result<Vec<ProjectFile>> {
        self.project.collect().await
    }

    /// Split the content directory into tracked and untracked entries.
    pub async fn classify(&self) -> Result<SyncClassification> {
        classify(
            self.project.content_dir(),
            self.project.rules(),
            self.project.extensions(),
            &self.project.collect_options(),
        )
        .await
    }

    /// Replace the remote file set with the local one.
    ///
    /// # Errors
    ///
    /// Collection errors abort before any remote call. A rejected replace
    /// returns [`Error::PushFailed`] naming every attempted file; nothing is
    /// retried.
    pub async fn push(&self) -> Result<PushReport> {
        let script_id = self.project.script_id()?;
        let files = self.collect_local_files().await?;
        let payload = plan_push(&files);
        let pushed: Vec<String> = payload.iter().map(|f| f.name.clone()).collect();

        self.remote
            .replace_files(script_id, &payload)
            .await
            .map_err(|source| Error::PushFailed {
                attempted: pushed.clone(),
                source,
            })?;

        info!(script_id, files = pushed.len(), "pushed");
        Ok(PushReport { pushed })
    }

    /// Fetch the remote files, at head or at `version`, mapped to local paths.
    pub async fn fetch_remote(&self, version: Option<u32>) -> Result<Vec<ProjectFile>> {
        let script_id = self.project.script_id()?;
        let remote_files = self.remote.fetch_files(script_id, version).await?;
        debug!(script_id, ?version, files = remote_files.len(), "fetched remote files");
        map_to_local(&remote_files, self.project.extensions())
    }

    /// Write the remote files into the content directory.
    ///
    /// Nothing is deleted here; the returned prune plan is computed against
    /// the files tracked before the pull and applied separately.
    pub async fn pull(&self, version: Option<u32>) -> Result<PullReport> {
        let mapped = self.fetch_remote(version).await?;
        let existing = self.tracked_before_pull()?;

        let plan = plan_pull(self.project.content_dir(), &mapped);
        let written = plan.apply().await?;
        let prune = plan_prune(&existing, &mapped);

        let untracked: Vec<NormalizedPath> = plan
            .writes
            .iter()
            .filter(|file| self.project.tracked_name(&file.local_path).is_none())
            .map(|file| file.local_path.clone())
            .collect();
        for path in &untracked {
            warn!(path = %path, "pulled file is not tracked by the local ignore rules");
        }

        Ok(PullReport {
            written,
            placeholders: plan.placeholders.iter().map(|f| f.remote_name.clone()).collect(),
            prune,
            untracked,
        })
    }

    fn tracked_before_pull(&self) -> Result<Vec<NormalizedPath>> {
        let content_dir = self.project.content_dir();
        if !content_dir.is_dir() {
            return Ok(Vec::new());
        }
        let max_depth = self.project.config().skip_subdirectories.then_some(1);
        Ok(walk_files(content_dir, max_depth)?
            .into_iter()
            .filter(|path| self.project.tracked_name(path).is_some())
            .collect())
    }

    pub async fn versions(&self) -> Result<Aggregated<Version>> {
        let script_id = self.project.script_id()?;
        let listed = aggregate(self.paging, |request| {
            self.remote.list_versions(script_id, request)
        })
        .await?;
        Ok(listed)
    }

    pub async fn deployments(&self) -> Result<Aggregated<Deployment>> {
        let script_id = self.project.script_id()?;
        let listed = aggregate(self.paging, |request| {
            self.remote.list_deployments(script_id, request)
        })
        .await?;
        Ok(listed)
    }

    pub async fn scripts(&self) -> Result<Aggregated<ScriptSummary>> {
        let listed = aggregate(self.paging, |request| self.remote.list_scripts(request)).await?;
        Ok(listed)
    }

    /// Start watching the content directory, feeding change events to `tx`.
    pub fn watch(&self, tx: mpsc::Sender<ChangeEvent>) -> Result<ContentWatcher> {
        watch_content_dir(&self.project, tx)
    }
}
