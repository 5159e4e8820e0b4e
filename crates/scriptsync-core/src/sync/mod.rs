//! Sync planning and orchestration
//!
//! This module provides:
//! - **push**: Turn collected local files into a whole-set replace payload
//! - **pull**: Plan and apply local writes from a remote snapshot, plus prune lists
//! - **status**: Classify local files as tracked or untracked
//! - **watch**: Re-push on local changes with at most one push in flight
//! - **engine**: Bind a loaded project to a remote service

mod engine;
mod pull;
mod push;
mod status;
mod watch;

pub use engine::{PullReport, PushReport, SyncEngine};
pub use pull::{
    DeletionGate, ForceDelete, PruneOutcome, PrunePlan, WritePlan, plan_prune, plan_pull,
};
pub use push::{PushPayload, plan_push};
pub use status::{SyncClassification, classify, collapse_untracked};
pub use watch::{ChangeEvent, ContentWatcher, DEFAULT_DEBOUNCE, run_push_loop, watch_content_dir};
