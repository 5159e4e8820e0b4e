//! Command implementations for scriptsync-cli

pub mod create;
pub mod list;
pub mod pull;
pub mod push;
pub mod status;

use std::path::Path;
use std::sync::Arc;

use scriptsync_core::{MirrorRemote, Project, SyncEngine};

use crate::error::{CliError, Result};

pub use create::run_create;
pub use list::{run_deployments, run_scripts, run_version, run_versions};
pub use pull::run_pull;
pub use push::run_push;
pub use status::run_status;

/// The remote named by `--remote` / `SCRIPTSYNC_REMOTE`.
pub(crate) fn open_remote(remote: Option<&Path>) -> Result<Arc<MirrorRemote>> {
    remote
        .map(|dir| Arc::new(MirrorRemote::new(dir)))
        .ok_or_else(|| {
            CliError::user("No remote configured: pass --remote <dir> or set SCRIPTSYNC_REMOTE")
        })
}

/// Load the project around `cwd` and bind it to the remote.
pub(crate) fn open_engine(cwd: &Path, remote: Option<&Path>) -> Result<SyncEngine> {
    let remote = open_remote(remote)?;
    let project = Project::discover(cwd)?;
    Ok(SyncEngine::new(project, remote))
}
