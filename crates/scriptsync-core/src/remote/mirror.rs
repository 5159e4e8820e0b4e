//! Filesystem-backed [`ScriptService`]
//!
//! Stores each project as JSON documents under a mirror directory:
//!
//! ```text
//! <root>/<scriptId>/script.json        title
//! <root>/<scriptId>/files.json         head file list
//! <root>/<scriptId>/versions.json      version records
//! <root>/<scriptId>/versions/<n>.json  file list of version n
//! <root>/<scriptId>/deployments.json   deployment records
//! ```
//!
//! Page tokens are decimal offsets.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use scriptsync_fs::{NormalizedPath, io};
use tracing::{debug, info};

use super::mapper::validate_remote_name;
use super::pagination::slice_page;
use super::{
    Deployment, Page, PageRequest, RemoteFile, ScriptService, ScriptSummary, TransportError,
    Version,
};
use crate::files::{FileType, MANIFEST_NAME};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScriptRecord {
    title: String,
}

/// A remote living in a local directory.
#[derive(Debug, Clone)]
pub struct MirrorRemote {
    root: NormalizedPath,
}

impl MirrorRemote {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn project_dir(&self, script_id: &str) -> Result<NormalizedPath, TransportError> {
        let valid = !script_id.is_empty()
            && !script_id.starts_with('.')
            && !script_id.contains(['/', '\\']);
        if !valid {
            return Err(TransportError::new(format!("invalid script id '{}'", script_id)));
        }
        Ok(self.root.join(script_id))
    }

    async fn existing_project_dir(&self, script_id: &str) -> Result<NormalizedPath, TransportError> {
        let dir = self.project_dir(script_id)?;
        if !tokio::fs::try_exists(dir.to_native()).await.unwrap_or(false) {
            return Err(TransportError::new(format!("project '{}' not found", script_id)));
        }
        Ok(dir)
    }

    /// Create an empty project with a title.
    ///
    /// Fails when a project with this id already exists.
    pub async fn create_project(&self, script_id: &str, title: &str) -> Result<(), TransportError> {
        let dir = self.project_dir(script_id)?;
        let record = dir.join("script.json");
        if tokio::fs::try_exists(record.to_native()).await.unwrap_or(false) {
            return Err(TransportError::new(format!(
                "project '{}' already exists",
                script_id
            )));
        }
        write_json(
            record,
            &ScriptRecord {
                title: title.to_string(),
            },
        )
        .await?;
        let head: Vec<RemoteFile> = read_json_or_default(&dir.join("files.json")).await?;
        write_json(dir.join("files.json"), &head).await
    }

    /// Snapshot the head files as the next numbered version.
    pub async fn create_version(
        &self,
        script_id: &str,
        description: Option<&str>,
    ) -> Result<Version, TransportError> {
        let dir = self.existing_project_dir(script_id).await?;
        let head: Vec<RemoteFile> = read_json_or_default(&dir.join("files.json")).await?;
        let mut versions: Vec<Version> = read_json_or_default(&dir.join("versions.json")).await?;

        let version = Version {
            version_number: versions.iter().map(|v| v.version_number).max().unwrap_or(0) + 1,
            description: description.map(str::to_string),
            create_time: Some(chrono::Utc::now()),
        };
        write_json(
            dir.join("versions").join(format!("{}.json", version.version_number)),
            &head,
        )
        .await?;
        versions.push(version.clone());
        write_json(dir.join("versions.json"), &versions).await?;

        info!(script_id, version = version.version_number, "created version");
        Ok(version)
    }

    /// Record a deployment.
    pub async fn add_deployment(
        &self,
        script_id: &str,
        deployment: Deployment,
    ) -> Result<(), TransportError> {
        let dir = self.existing_project_dir(script_id).await?;
        let mut deployments: Vec<Deployment> =
            read_json_or_default(&dir.join("deployments.json")).await?;
        deployments.push(deployment);
        write_json(dir.join("deployments.json"), &deployments).await
    }
}

/// Validate a payload the way the hosted API does.
fn validate_payload(files: &[RemoteFile]) -> Result<(), TransportError> {
    let mut error = TransportError::new("file list rejected");
    let mut seen = HashSet::new();

    for file in files {
        if validate_remote_name(&file.name).is_err() {
            error = error.with_file_error(Some(file.name.clone()), "invalid file name");
        }
        if !seen.insert(file.name.as_str()) {
            error = error.with_file_error(Some(file.name.clone()), "duplicate file name");
        }
        if file.file_type == FileType::Config && file.name != MANIFEST_NAME {
            error = error.with_file_error(
                Some(file.name.clone()),
                "only the project manifest may be a JSON file",
            );
        }
    }

    let has_manifest = files
        .iter()
        .any(|f| f.file_type == FileType::Config && f.name == MANIFEST_NAME);
    if !has_manifest {
        error = error.with_file_error(None, "project manifest 'appsscript' is missing");
    }

    if error.file_errors.is_empty() {
        Ok(())
    } else {
        Err(error)
    }
}

async fn read_json<T: DeserializeOwned>(path: &NormalizedPath) -> Result<Option<T>, TransportError> {
    match tokio::fs::read_to_string(path.to_native()).await {
        Ok(content) => serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| TransportError::new(format!("corrupt mirror file {}: {}", path, e))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TransportError::new(format!("cannot read {}: {}", path, e))),
    }
}

async fn read_json_or_default<T: DeserializeOwned + Default>(
    path: &NormalizedPath,
) -> Result<T, TransportError> {
    Ok(read_json(path).await?.unwrap_or_default())
}

async fn write_json<T: Serialize>(path: NormalizedPath, value: &T) -> Result<(), TransportError> {
    let content = serde_json::to_vec_pretty(value)
        .map_err(|e| TransportError::new(format!("cannot encode {}: {}", path, e)))?;
    let target = path.clone();
    tokio::task::spawn_blocking(move || io::write_atomic(&target, &content))
        .await
        .map_err(|e| TransportError::new(format!("write task failed: {}", e)))?
        .map_err(|e| TransportError::new(e.to_string()))?;
    debug!(path = %path, "wrote mirror file");
    Ok(())
}

#[async_trait]
impl ScriptService for MirrorRemote {
    async fn fetch_files(
        &self,
        script_id: &str,
        version: Option<u32>,
    ) -> Result<Vec<RemoteFile>, TransportError> {
        let dir = self.existing_project_dir(script_id).await?;
        let path = match version {
            None => dir.join("files.json"),
            Some(number) => dir.join("versions").join(format!("{}.json", number)),
        };
        read_json(&path).await?.ok_or_else(|| match version {
            Some(number) => TransportError::new(format!("version {} not found", number)),
            None => TransportError::new(format!("project '{}' has no files", script_id)),
        })
    }

    async fn replace_files(
        &self,
        script_id: &str,
        files: &[RemoteFile],
    ) -> Result<(), TransportError> {
        let dir = self.existing_project_dir(script_id).await?;
        validate_payload(files)?;
        write_json(dir.join("files.json"), &files).await?;
        info!(script_id, files = files.len(), "replaced remote files");
        Ok(())
    }

    async fn list_versions(
        &self,
        script_id: &str,
        request: PageRequest,
    ) -> Result<Page<Version>, TransportError> {
        let dir = self.existing_project_dir(script_id).await?;
        let versions: Vec<Version> = read_json_or_default(&dir.join("versions.json")).await?;
        slice_page(&versions, &request)
    }

    async fn list_deployments(
        &self,
        script_id: &str,
        request: PageRequest,
    ) -> Result<Page<Deployment>, TransportError> {
        let dir = self.existing_project_dir(script_id).await?;
        let deployments: Vec<Deployment> =
            read_json_or_default(&dir.join("deployments.json")).await?;
        slice_page(&deployments, &request)
    }

    async fn list_scripts(&self, request: PageRequest) -> Result<Page<ScriptSummary>, TransportError> {
        let mut scripts = Vec::new();
        let mut entries = match tokio::fs::read_dir(self.root.to_native()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Page::last(Vec::new())),
            Err(e) => return Err(TransportError::new(format!("cannot list {}: {}", self.root, e))),
        };
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| TransportError::new(format!("cannot list {}: {}", self.root, e)))?
        {
            let id = entry.file_name().to_string_lossy().to_string();
            let dir = self.root.join(&id);
            if let Some(record) = read_json::<ScriptRecord>(&dir.join("script.json")).await? {
                scripts.push(ScriptSummary {
                    id,
                    name: record.title,
                });
            }
        }
        scripts.sort_by(|a, b| a.id.cmp(&b.id));
        slice_page(&scripts, &request)
    }
}
