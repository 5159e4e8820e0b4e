//! Watch mode against a real filesystem watcher

use std::sync::Arc;
use std::time::Duration;

use scriptsync_core::sync::{run_push_loop, watch_content_dir};
use scriptsync_core::{MirrorRemote, Project, ScriptService, SyncEngine};
use scriptsync_fs::NormalizedPath;
use scriptsync_test_utils::TestProject;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(10);

#[tokio::test]
async fn test_only_tracked_changes_are_forwarded() {
    let project = TestProject::with_script_id("abc");
    let loaded = Project::load(&project.config_path()).unwrap();
    let (tx, mut rx) = mpsc::channel(16);
    let _watcher = watch_content_dir(&loaded, tx).unwrap();

    project.write_file("README.md", "ignored by extension");
    project.write_file("Code.js", "main()");

    let event = timeout(WAIT, rx.recv())
        .await
        .expect("no change event")
        .expect("channel closed");
    assert!(event.paths.iter().all(|p| p == &NormalizedPath::new("Code.js")));
}

#[tokio::test]
async fn test_change_triggers_push_to_remote() {
    let remote_dir = TempDir::new().unwrap();
    let remote = Arc::new(MirrorRemote::new(remote_dir.path()));
    remote.create_project("abc", "Watched").await.unwrap();

    let project = TestProject::with_script_id("abc").file("appsscript.json", "{}");
    let engine = SyncEngine::new(Project::load(&project.config_path()).unwrap(), remote.clone());
    let (tx, rx) = mpsc::channel(16);
    let watcher = engine.watch(tx).unwrap();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();

    let pusher = tokio::spawn(async move {
        let engine = &engine;
        let done = &done_tx;
        run_push_loop(rx, Duration::from_millis(50), move |_changed| async move {
            engine.push().await?;
            let _ = done.send(());
            Ok(())
        })
        .await
    });

    project.write_file("Code.js", "watched()");
    timeout(WAIT, done_rx.recv())
        .await
        .expect("no push happened")
        .expect("push loop ended");

    let names: Vec<_> = remote
        .fetch_files("abc", None)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert!(names.contains(&"Code".to_string()));

    drop(watcher);
    pusher.abort();
}
