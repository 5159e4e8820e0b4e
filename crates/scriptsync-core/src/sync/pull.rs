//! Pull write plans and prune plans
//!
//! Planning never touches the filesystem; `apply` does.

use std::collections::BTreeSet;

use scriptsync_fs::{NormalizedPath, io};
use serde::Serialize;
use tracing::{debug, info};

use crate::Result;
use crate::files::ProjectFile;

/// Files a pull writes under the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePlan {
    content_dir: NormalizedPath,
    /// Files with content, written on apply
    pub writes: Vec<ProjectFile>,
    /// Empty remote files, listed but never written
    pub placeholders: Vec<ProjectFile>,
}

/// Split mapped remote files into writes and placeholders.
pub fn plan_pull(content_dir: &NormalizedPath, mapped: &[ProjectFile]) -> WritePlan {
    let (placeholders, writes): (Vec<_>, Vec<_>) =
        mapped.iter().cloned().partition(ProjectFile::is_placeholder);
    WritePlan {
        content_dir: content_dir.clone(),
        writes,
        placeholders,
    }
}

impl WritePlan {
    pub fn content_dir(&self) -> &NormalizedPath {
        &self.content_dir
    }

    /// Write every planned file atomically, creating directories as needed.
    ///
    /// Returns the content-relative paths written.
    pub async fn apply(&self) -> Result<Vec<NormalizedPath>> {
        let content_dir = self.content_dir.clone();
        let writes = self.writes.clone();
        let written = tokio::task::spawn_blocking(move || -> Result<Vec<NormalizedPath>> {
            io::ensure_dir(&content_dir)?;
            let mut written = Vec::with_capacity(writes.len());
            for file in writes {
                let target = content_dir.join(file.local_path.as_str());
                io::write_text(&target, &file.source)?;
                debug!(path = %file.local_path, "wrote pulled file");
                written.push(file.local_path);
            }
            Ok(written)
        })
        .await
        .map_err(std::io::Error::other)??;

        info!(files = written.len(), dir = %self.content_dir, "pull written");
        Ok(written)
    }
}

/// Decides whether a prune may delete the given paths.
pub trait DeletionGate {
    fn approve(&self, paths: &[NormalizedPath]) -> bool;
}

/// Approves every deletion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForceDelete;

impl DeletionGate for ForceDelete {
    fn approve(&self, _paths: &[NormalizedPath]) -> bool {
        true
    }
}

/// Local files that were tracked before a pull and have no remote counterpart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrunePlan {
    pub paths: Vec<NormalizedPath>,
}

/// Result of applying a prune.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    pub deleted: Vec<NormalizedPath>,
    pub declined: bool,
}

/// Compute the prune list; `existing` holds content-relative paths tracked before the pull.
///
/// Placeholders count as pulled so their local files survive.
pub fn plan_prune(existing: &[NormalizedPath], pulled: &[ProjectFile]) -> PrunePlan {
    let pulled: BTreeSet<&NormalizedPath> = pulled.iter().map(|f| &f.local_path).collect();
    let paths: BTreeSet<NormalizedPath> = existing
        .iter()
        .filter(|path| !pulled.contains(path))
        .cloned()
        .collect();
    PrunePlan {
        paths: paths.into_iter().collect(),
    }
}

impl PrunePlan {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Delete the planned files if `gate` approves.
    ///
    /// Files already gone are skipped. An empty plan never consults the gate.
    pub fn apply(&self, content_dir: &NormalizedPath, gate: &dyn DeletionGate) -> Result<PruneOutcome> {
        if self.paths.is_empty() {
            return Ok(PruneOutcome::default());
        }
        if !gate.approve(&self.paths) {
            info!(files = self.paths.len(), "prune declined");
            return Ok(PruneOutcome {
                deleted: Vec::new(),
                declined: true,
            });
        }

        let mut deleted = Vec::new();
        for path in &self.paths {
            match io::remove_file(&content_dir.join(path.as_str())) {
                Ok(()) => deleted.push(path.clone()),
                Err(e) if e.is_not_found() => debug!(path = %path, "already removed"),
                Err(e) => return Err(e.into()),
            }
        }
        info!(files = deleted.len(), "pruned local files");
        Ok(PruneOutcome {
            deleted,
            declined: false,
        })
    }
}
