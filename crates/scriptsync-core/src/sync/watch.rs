//! Watch mode: re-push on local changes
//!
//! Filesystem events are filtered down to tracked paths and forwarded over
//! a channel. The push loop awaits one push at a time; events that arrive
//! while a push is in flight are coalesced into a single follow-up push.

use std::future::Future;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use scriptsync_fs::NormalizedPath;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::Result;
use crate::config::Project;

/// Quiet period after a change before pushing.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Tracked paths that changed, relative to the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub paths: Vec<NormalizedPath>,
}

/// Keeps the underlying watcher alive; dropping it stops the event stream.
pub struct ContentWatcher {
    _watcher: RecommendedWatcher,
    root: NormalizedPath,
}

impl ContentWatcher {
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }
}

impl std::fmt::Debug for ContentWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentWatcher").field("root", &self.root).finish()
    }
}

/// Watch the project's content directory recursively.
///
/// Only events touching paths that would be tracked are forwarded.
/// Access events are skipped. A full channel drops the event, since a
/// queued one already triggers the next push.
pub fn watch_content_dir(project: &Project, tx: mpsc::Sender<ChangeEvent>) -> Result<ContentWatcher> {
    let root = project.content_dir().clone();
    let filter = project.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                let paths = tracked_paths(&filter, &event);
                if paths.is_empty() {
                    return;
                }
                debug!(?paths, "tracked change");
                if tx.try_send(ChangeEvent { paths }).is_err() {
                    debug!("change already queued");
                }
            }
            Err(e) => warn!("File watcher error: {}", e),
        },
        Config::default(),
    )?;
    watcher.watch(&root.to_native(), RecursiveMode::Recursive)?;

    info!(dir = %root, "watching for changes");
    Ok(ContentWatcher {
        _watcher: watcher,
        root,
    })
}

fn tracked_paths(project: &Project, event: &Event) -> Vec<NormalizedPath> {
    event
        .paths
        .iter()
        .filter_map(|path| NormalizedPath::new(path).relative_to(project.content_dir()))
        .filter(|relative| !relative.is_empty() && project.tracked_name(relative).is_some())
        .collect()
}

/// Run `push` once per batch of change events until the channel closes.
///
/// After an event arrives the loop waits `debounce`, drains everything
/// queued and awaits exactly one push. Push failures are logged and the
/// loop keeps going. Returns the number of pushes attempted.
pub async fn run_push_loop<F, Fut>(
    mut events: mpsc::Receiver<ChangeEvent>,
    debounce: Duration,
    mut push: F,
) -> usize
where
    F: FnMut(Vec<NormalizedPath>) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut pushes = 0;
    while let Some(first) = events.recv().await {
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }

        let mut changed = first.paths;
        while let Ok(next) = events.try_recv() {
            changed.extend(next.paths);
        }
        changed.sort();
        changed.dedup();

        pushes += 1;
        debug!(push = pushes, files = changed.len(), "change detected, pushing");
        if let Err(e) = push(changed).await {
            warn!("Push failed: {}", e);
        }
    }
    debug!(pushes, "change stream closed");
    pushes
}
