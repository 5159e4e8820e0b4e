//! Push payload planning

use tracing::{debug, warn};

use crate::files::ProjectFile;
use crate::remote::RemoteFile;

/// Ordered file list sent as one whole-set replace.
pub type PushPayload = Vec<RemoteFile>;

/// Build the payload for a push.
///
/// Keeps the collector's order. The remote side rejects a project without
/// a manifest; that is reported by the remote, here it is only logged.
pub fn plan_push(local_files: &[ProjectFile]) -> PushPayload {
    if !local_files.iter().any(ProjectFile::is_manifest) {
        warn!("no appsscript manifest among pushed files");
    }
    let payload: PushPayload = local_files.iter().map(RemoteFile::from).collect();
    debug!(files = payload.len(), "planned push");
    payload
}
