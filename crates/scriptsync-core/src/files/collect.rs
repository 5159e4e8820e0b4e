//! Local file discovery
//!
//! Walks the content directory, filters by ignore rules and extensions,
//! derives remote names and refuses to produce an ambiguous file set.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use futures::future::try_join_all;
use scriptsync_fs::NormalizedPath;
use tracing::debug;
use walkdir::WalkDir;

use super::{ExtensionMap, FileType, IgnoreDecision, IgnoreRuleSet, ProjectFile};
use crate::{Error, Result};

/// Options that shape a collection run.
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Only consider files directly inside the content directory
    pub skip_subdirectories: bool,
    /// Remote names or content-relative paths that must be pushed first, in order
    pub push_order: Vec<String>,
}

/// Collect the tracked files under `content_dir`.
///
/// Fails with [`Error::FileConflict`] when two files map to one remote
/// name; no partial list is returned in that case. Sources are read
/// concurrently once every path has been resolved and checked.
pub async fn collect(
    content_dir: &NormalizedPath,
    rules: &IgnoreRuleSet,
    extensions: &ExtensionMap,
    options: &CollectOptions,
) -> Result<Vec<ProjectFile>> {
    let max_depth = options.skip_subdirectories.then_some(1);
    let candidates: Vec<(NormalizedPath, String, FileType)> = walk_files(content_dir, max_depth)?
        .into_iter()
        .filter_map(|path| {
            let (name, file_type) = resolve_tracked(&path, rules, extensions, options)?;
            Some((path, name, file_type))
        })
        .collect();

    check_conflicts(&candidates)?;

    let sources = try_join_all(candidates.iter().map(|(path, _, _)| {
        let absolute = content_dir.join(path.as_str());
        async move {
            tokio::fs::read_to_string(absolute.to_native())
                .await
                .map_err(|e| Error::Fs(scriptsync_fs::Error::io(absolute.to_native(), e)))
        }
    }))
    .await?;

    let mut files: Vec<ProjectFile> = candidates
        .into_iter()
        .zip(sources)
        .map(|((local_path, remote_name, file_type), source)| ProjectFile {
            remote_name,
            local_path,
            file_type,
            source,
        })
        .collect();

    order_for_push(&mut files, &options.push_order);
    debug!(count = files.len(), dir = %content_dir, "collected local files");
    Ok(files)
}

/// Decide whether a content-relative path is tracked.
///
/// Returns the remote name and type for tracked paths.
pub(crate) fn resolve_tracked(
    relative: &NormalizedPath,
    rules: &IgnoreRuleSet,
    extensions: &ExtensionMap,
    options: &CollectOptions,
) -> Option<(String, FileType)> {
    if options.skip_subdirectories && relative.segments().count() > 1 {
        return None;
    }

    if rules.decision(relative) == IgnoreDecision::Excluded {
        debug!(path = %relative, "ignored by rules");
        return None;
    }

    let hidden = relative
        .first_segment()
        .is_some_and(|top| top.starts_with('.'));
    if hidden && !rules.explicitly_includes(relative) {
        debug!(path = %relative, "hidden path skipped");
        return None;
    }

    let resolved = extensions.resolve(relative);
    if resolved.is_none() {
        debug!(path = %relative, "unrecognized extension");
    }
    resolved
}

/// List regular files under `root` as root-relative paths, sorted.
///
/// Symlinks are not followed.
pub(crate) fn walk_files(
    root: &NormalizedPath,
    max_depth: Option<usize>,
) -> Result<Vec<NormalizedPath>> {
    let mut walker = WalkDir::new(root.to_native())
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = NormalizedPath::new(entry.path());
        if let Some(relative) = path.relative_to(root) {
            files.push(relative);
        }
    }
    files.sort();
    Ok(files)
}

fn check_conflicts(candidates: &[(NormalizedPath, String, FileType)]) -> Result<()> {
    let mut groups: BTreeMap<&str, Vec<&NormalizedPath>> = BTreeMap::new();
    for (path, name, _) in candidates {
        groups.entry(name.as_str()).or_default().push(path);
    }

    match groups.into_iter().find(|(_, paths)| paths.len() > 1) {
        Some((name, paths)) => Err(Error::FileConflict {
            basename: name.to_string(),
            paths: paths.into_iter().cloned().collect(),
        }),
        None => Ok(()),
    }
}

/// Sort files for a push.
///
/// Entries named in `push_order` come first in the given order; the rest
/// follow alphabetically by remote name. An entry names a file by remote
/// name or by content-relative path.
pub fn order_for_push(files: &mut [ProjectFile], push_order: &[String]) {
    let order: Vec<NormalizedPath> = push_order.iter().map(NormalizedPath::new).collect();
    let rank = |file: &ProjectFile| {
        order
            .iter()
            .position(|entry| entry.as_str() == file.remote_name || *entry == file.local_path)
    };

    files.sort_by(|a, b| match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.remote_name.cmp(&b.remote_name),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, ext: &str) -> ProjectFile {
        ProjectFile::new(name, format!("{}{}", name, ext), FileType::Script, "x")
    }

    #[test]
    fn push_order_entries_come_first() {
        let mut files = vec![file("b", ".js"), file("a", ".js"), file("z", ".js"), file("c", ".js")];
        order_for_push(&mut files, &["z".to_string(), "c.js".to_string()]);
        let names: Vec<_> = files.iter().map(|f| f.remote_name.as_str()).collect();
        assert_eq!(names, ["z", "c", "a", "b"]);
    }

    #[test]
    fn unknown_push_order_entries_are_ignored() {
        let mut files = vec![file("b", ".js"), file("a", ".js")];
        order_for_push(&mut files, &["missing".to_string()]);
        let names: Vec<_> = files.iter().map(|f| f.remote_name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
