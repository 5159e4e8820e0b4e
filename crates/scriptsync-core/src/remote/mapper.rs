//! Remote snapshot → local file mapping

use scriptsync_fs::NormalizedPath;
use tracing::debug;

use super::RemoteFile;
use crate::files::{ExtensionMap, ProjectFile};
use crate::{Error, Result};

/// Check that a remote name maps to a path inside the content root.
///
/// Rejects empty and absolute names, `.`/`..` segments and backslashes.
/// Names under a hidden top segment such as `.cfg/Code` are accepted: they
/// are written on pull but only collected again when an ignore negation
/// names that segment.
pub fn validate_remote_name(name: &str) -> Result<NormalizedPath> {
    let normalized = NormalizedPath::new(name);
    let valid = !normalized.is_empty()
        && !normalized.is_absolute()
        && !normalized.has_parent_traversal()
        && normalized.as_str() == name;
    if valid {
        Ok(normalized)
    } else {
        Err(Error::InvalidRemoteName {
            name: name.to_string(),
        })
    }
}

/// Annotate remote files with the local path a pull writes them to.
///
/// The local path is the remote name plus the preferred extension of its
/// type, relative to the content root. A type without a configured
/// extension aborts the mapping.
pub fn map_to_local(remote_files: &[RemoteFile], extensions: &ExtensionMap) -> Result<Vec<ProjectFile>> {
    remote_files
        .iter()
        .map(|remote| {
            let name = validate_remote_name(&remote.name)?;
            let extension = extensions
                .preferred_extension(remote.file_type)
                .ok_or_else(|| Error::UnknownType {
                    name: remote.name.clone(),
                    file_type: remote.file_type,
                })?;
            let local_path = NormalizedPath::new(format!("{}{}", name, extension));
            debug!(name = %remote.name, path = %local_path, "mapped remote file");
            Ok(ProjectFile {
                remote_name: remote.name.clone(),
                local_path,
                file_type: remote.file_type,
                source: remote.source.clone(),
            })
        })
        .collect()
}
