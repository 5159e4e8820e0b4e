//! Remote collaborator boundary
//!
//! The engine talks to the hosted project API only through
//! [`ScriptService`]. Implementations receive everything they need
//! (credentials, endpoints, directories) through their constructors;
//! there is no process-wide client.

mod mapper;
mod memory;
mod mirror;
pub mod pagination;

pub use mapper::{map_to_local, validate_remote_name};
pub use memory::InMemoryRemote;
pub use mirror::MirrorRemote;
pub use pagination::{Aggregated, Page, PageOptions, PageRequest, aggregate};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::files::{FileType, ProjectFile};

/// A file as exchanged with the remote project API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    #[serde(default)]
    pub source: String,
}

impl RemoteFile {
    pub fn new(name: impl Into<String>, file_type: FileType, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_type,
            source: source.into(),
        }
    }
}

impl From<&ProjectFile> for RemoteFile {
    fn from(file: &ProjectFile) -> Self {
        Self {
            name: file.remote_name.clone(),
            file_type: file.file_type,
            source: file.source.clone(),
        }
    }
}

/// An immutable snapshot of a remote project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub version_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

/// A deployment of a remote project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub deployment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

/// A remote project visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSummary {
    pub id: String,
    pub name: String,
}

/// A validation message the remote side attached to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    /// Remote name of the offending file, when the remote side reported one
    pub name: Option<String>,
    pub message: String,
}

/// Failure of a remote call (network, auth, quota, validation).
///
/// Never retried by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub file_errors: Vec<FileError>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file_errors: Vec::new(),
        }
    }

    /// Attach a per-file validation message.
    pub fn with_file_error(mut self, name: Option<String>, message: impl Into<String>) -> Self {
        self.file_errors.push(FileError {
            name,
            message: message.into(),
        });
        self
    }
}

/// Remote project API as consumed by the engine.
#[async_trait]
pub trait ScriptService: Send + Sync {
    /// Fetch the file list of a project, at head or at a version.
    async fn fetch_files(
        &self,
        script_id: &str,
        version: Option<u32>,
    ) -> Result<Vec<RemoteFile>, TransportError>;

    /// Atomically replace the project's whole file list.
    async fn replace_files(&self, script_id: &str, files: &[RemoteFile])
    -> Result<(), TransportError>;

    async fn list_versions(
        &self,
        script_id: &str,
        request: PageRequest,
    ) -> Result<Page<Version>, TransportError>;

    async fn list_deployments(
        &self,
        script_id: &str,
        request: PageRequest,
    ) -> Result<Page<Deployment>, TransportError>;

    async fn list_scripts(&self, request: PageRequest) -> Result<Page<ScriptSummary>, TransportError>;
}
