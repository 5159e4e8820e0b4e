//! In-memory [`ScriptService`] for tests and dry runs

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::pagination::slice_page;
use super::{
    Deployment, Page, PageRequest, RemoteFile, ScriptService, ScriptSummary, TransportError,
    Version,
};

#[derive(Debug, Default)]
struct Project {
    title: String,
    head: Vec<RemoteFile>,
    versions: Vec<(Version, Vec<RemoteFile>)>,
    deployments: Vec<Deployment>,
}

#[derive(Debug, Default)]
struct State {
    projects: BTreeMap<String, Project>,
    replace_calls: usize,
    queued_failures: VecDeque<TransportError>,
}

/// A remote held entirely in memory.
///
/// Every `replace_files` call is counted and failures can be queued to
/// exercise error paths.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    state: Mutex<State>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means another test thread panicked
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create or overwrite a project's head files.
    pub fn insert_project(&self, script_id: &str, title: &str, files: Vec<RemoteFile>) {
        let mut state = self.state();
        let project = state.projects.entry(script_id.to_string()).or_default();
        project.title = title.to_string();
        project.head = files;
    }

    /// Snapshot the head files as a new numbered version.
    pub fn create_version(&self, script_id: &str, description: Option<&str>) -> Option<Version> {
        let mut state = self.state();
        let project = state.projects.get_mut(script_id)?;
        let version = Version {
            version_number: project.versions.len() as u32 + 1,
            description: description.map(str::to_string),
            create_time: Some(chrono::Utc::now()),
        };
        let head = project.head.clone();
        project.versions.push((version.clone(), head));
        Some(version)
    }

    pub fn insert_deployment(&self, script_id: &str, deployment: Deployment) {
        let mut state = self.state();
        state
            .projects
            .entry(script_id.to_string())
            .or_default()
            .deployments
            .push(deployment);
    }

    /// Current head files of a project.
    pub fn head(&self, script_id: &str) -> Option<Vec<RemoteFile>> {
        self.state().projects.get(script_id).map(|p| p.head.clone())
    }

    /// Number of `replace_files` calls so far, failed ones included.
    pub fn replace_calls(&self) -> usize {
        self.state().replace_calls
    }

    /// Make the next `replace_files` call fail with `error`.
    pub fn fail_next_replace(&self, error: TransportError) {
        self.state().queued_failures.push_back(error);
    }
}

fn missing(script_id: &str) -> TransportError {
    TransportError::new(format!("project '{}' not found", script_id))
}

#[async_trait]
impl ScriptService for InMemoryRemote {
    async fn fetch_files(
        &self,
        script_id: &str,
        version: Option<u32>,
    ) -> Result<Vec<RemoteFile>, TransportError> {
        let state = self.state();
        let project = state.projects.get(script_id).ok_or_else(|| missing(script_id))?;
        match version {
            None => Ok(project.head.clone()),
            Some(number) => project
                .versions
                .iter()
                .find(|(v, _)| v.version_number == number)
                .map(|(_, files)| files.clone())
                .ok_or_else(|| TransportError::new(format!("version {} not found", number))),
        }
    }

    async fn replace_files(
        &self,
        script_id: &str,
        files: &[RemoteFile],
    ) -> Result<(), TransportError> {
        let mut state = self.state();
        state.replace_calls += 1;
        if let Some(error) = state.queued_failures.pop_front() {
            return Err(error);
        }
        state.projects.entry(script_id.to_string()).or_default().head = files.to_vec();
        Ok(())
    }

    async fn list_versions(
        &self,
        script_id: &str,
        request: PageRequest,
    ) -> Result<Page<Version>, TransportError> {
        let state = self.state();
        let project = state.projects.get(script_id).ok_or_else(|| missing(script_id))?;
        let versions: Vec<Version> = project.versions.iter().map(|(v, _)| v.clone()).collect();
        slice_page(&versions, &request)
    }

    async fn list_deployments(
        &self,
        script_id: &str,
        request: PageRequest,
    ) -> Result<Page<Deployment>, TransportError> {
        let state = self.state();
        let project = state.projects.get(script_id).ok_or_else(|| missing(script_id))?;
        slice_page(&project.deployments, &request)
    }

    async fn list_scripts(&self, request: PageRequest) -> Result<Page<ScriptSummary>, TransportError> {
        let scripts: Vec<ScriptSummary> = self
            .state()
            .projects
            .iter()
            .map(|(id, project)| ScriptSummary {
                id: id.clone(),
                name: project.title.clone(),
            })
            .collect();
        slice_page(&scripts, &request)
    }
}
