//! File synchronization and reconciliation engine for scriptsync
//!
//! This crate keeps a directory of local source files in step with a
//! remote script project, implementing:
//!
//! - **Ignore rules**: gitignore-style patterns from `.claspignore` or built-in defaults
//! - **Extension mapping**: extension ↔ file type resolution, case-insensitive
//! - **Collection**: walking the content directory into uniquely named project files
//! - **Remote mapping**: remote snapshots annotated with the local paths a pull writes
//! - **Sync planning**: push payloads, pull write plans, prune lists and status
//! - **Pagination**: merging paged listings under a page ceiling
//! - **Watch mode**: re-pushing on change with at most one push in flight
//!
//! # Architecture
//!
//! ```text
//!                  CLI
//!                   |
//!            scriptsync-core
//!        config / files / sync
//!                   |
//!        +----------+----------+
//!        |                     |
//!  scriptsync-fs        ScriptService
//!                   (remote collaborator)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scriptsync_core::{InMemoryRemote, Project, Result, SyncEngine};
//!
//! async fn example() -> Result<()> {
//!     let project = Project::discover(std::path::Path::new("."))?;
//!     let engine = SyncEngine::new(project, Arc::new(InMemoryRemote::new()));
//!     let report = engine.push().await?;
//!     println!("pushed {} files", report.pushed.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod remote;
pub mod sync;

pub use config::{CONFIG_FILE_NAME, Project, ProjectConfig};
pub use error::{Error, Result};
pub use files::{
    CollectOptions, ExtensionMap, FileType, IgnoreDecision, IgnoreRuleSet, ProjectFile, collect,
};
pub use remote::{
    Aggregated, Deployment, FileError, InMemoryRemote, MirrorRemote, Page, PageOptions,
    PageRequest, RemoteFile, ScriptService, ScriptSummary, TransportError, Version, aggregate,
    map_to_local,
};
pub use sync::{
    ChangeEvent, ContentWatcher, DeletionGate, ForceDelete, PruneOutcome, PrunePlan, PullReport,
    PushPayload, PushReport, SyncClassification, SyncEngine, WritePlan, classify, plan_prune,
    plan_pull, plan_push, run_push_loop,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_names_the_path() {
        let error = Error::ConfigNotFound {
            path: std::path::PathBuf::from("/work/project"),
        };
        assert!(error.to_string().contains("/work/project"));
    }

    #[test]
    fn push_failed_counts_attempted_files() {
        let error = Error::PushFailed {
            attempted: vec!["appsscript".into(), "Code".into()],
            source: TransportError::new("quota exceeded"),
        };
        assert_eq!(error.to_string(), "Push of 2 file(s) failed: quota exceeded");
    }
}
