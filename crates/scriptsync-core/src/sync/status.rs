//! Tracked / untracked classification

use std::collections::BTreeSet;

use scriptsync_fs::NormalizedPath;
use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::files::collect::walk_files;
use crate::files::{CollectOptions, ExtensionMap, IgnoreRuleSet, ProjectFile, collect};

/// Result of a status run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncClassification {
    pub tracked: Vec<ProjectFile>,
    /// Untracked file paths and collapsed `dir/` prefixes, sorted
    pub untracked: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusJson<'a> {
    tracked_files: Vec<&'a str>,
    untracked_files: &'a [String],
}

impl SyncClassification {
    /// Content-relative paths of the tracked files.
    pub fn tracked_paths(&self) -> Vec<&NormalizedPath> {
        self.tracked.iter().map(|f| &f.local_path).collect()
    }

    /// Render as `{"trackedFiles": [...], "untrackedFiles": [...]}`.
    pub fn to_json(&self) -> Result<String> {
        let json = StatusJson {
            tracked_files: self.tracked.iter().map(|f| f.local_path.as_str()).collect(),
            untracked_files: &self.untracked,
        };
        Ok(serde_json::to_string_pretty(&json)?)
    }
}

/// Classify every file under `content_dir`.
///
/// Conflicts among tracked files propagate as errors.
pub async fn classify(
    content_dir: &NormalizedPath,
    rules: &IgnoreRuleSet,
    extensions: &ExtensionMap,
    options: &CollectOptions,
) -> Result<SyncClassification> {
    let tracked = collect(content_dir, rules, extensions, options).await?;
    let tracked_paths: BTreeSet<NormalizedPath> =
        tracked.iter().map(|f| f.local_path.clone()).collect();

    let untracked: Vec<NormalizedPath> = walk_files(content_dir, None)?
        .into_iter()
        .filter(|path| !tracked_paths.contains(path))
        .collect();
    let tracked_paths: Vec<NormalizedPath> = tracked_paths.into_iter().collect();
    let untracked = collapse_untracked(&untracked, &tracked_paths);

    debug!(tracked = tracked.len(), untracked = untracked.len(), "classified");
    Ok(SyncClassification { tracked, untracked })
}

/// Collapse untracked paths into directory entries.
///
/// Each untracked file is reported as its topmost ancestor directory that
/// holds no tracked file (`dir/`), or as itself when every ancestor holds
/// one.
pub fn collapse_untracked(untracked: &[NormalizedPath], tracked: &[NormalizedPath]) -> Vec<String> {
    let mut occupied: BTreeSet<String> = BTreeSet::new();
    for path in tracked {
        let mut dir = path.parent();
        while let Some(current) = dir.filter(|d| !d.is_empty()) {
            dir = current.parent();
            occupied.insert(current.to_string());
        }
    }

    let mut entries = BTreeSet::new();
    for path in untracked {
        let segments: Vec<&str> = path.segments().collect();
        let mut prefix = String::new();
        let mut collapsed = None;
        for segment in segments.iter().take(segments.len().saturating_sub(1)) {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            if !occupied.contains(&prefix) {
                collapsed = Some(format!("{}/", prefix));
                break;
            }
        }
        entries.insert(collapsed.unwrap_or_else(|| path.to_string()));
    }
    entries.into_iter().collect()
}
