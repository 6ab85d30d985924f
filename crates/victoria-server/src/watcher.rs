//! Content directory watching for live reload.
//!
//! Raw notify events are coalesced on a background thread: changes are
//! collected until the directories have been quiet for [`QUIET_PERIOD`], then
//! delivered together as one [`ChangeSet`]. Nothing is dropped, so the last
//! write of a burst always reaches the server.

use std::mem;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// How long the watched directories must stay unchanged before a batch is sent.
pub const QUIET_PERIOD: Duration = Duration::from_millis(100);

/// A single file change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Markdown document was modified
    DocModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Any other modification
    Modified(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::DocModified(path)
            | WatchEvent::Created(path)
            | WatchEvent::Deleted(path)
            | WatchEvent::Modified(path) => path,
        }
    }

    fn from_notify(path: &Path, kind: &EventKind) -> Option<Self> {
        let path = path.to_path_buf();
        match kind {
            EventKind::Create(_) => Some(WatchEvent::Created(path)),
            EventKind::Remove(_) => Some(WatchEvent::Deleted(path)),
            EventKind::Modify(_) if path.extension().is_some_and(|ext| ext == "md") => {
                Some(WatchEvent::DocModified(path))
            }
            EventKind::Modify(_) => Some(WatchEvent::Modified(path)),
            _ => None,
        }
    }
}

/// Changes seen during one burst of activity, in arrival order, without
/// repeats.
pub type ChangeSet = Vec<WatchEvent>;

/// Watches directories and reports coalesced changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `paths` recursively. Paths that do not exist are skipped.
    ///
    /// The returned receiver yields one [`ChangeSet`] per quiet period.
    pub fn new(
        paths: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<ChangeSet>), std::io::Error> {
        let (raw_tx, raw_rx) = mpsc::channel();
        let (batch_tx, batch_rx) = async_mpsc::channel(16);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    let _ = raw_tx.send(event);
                }
                Err(e) => tracing::warn!("Watch error: {}", e),
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths.iter().filter(|path| path.exists()) {
            watcher
                .watch(path, RecursiveMode::Recursive)
                .map_err(std::io::Error::other)?;
            tracing::debug!("Watching {}", path.display());
        }

        std::thread::spawn(move || coalesce(raw_rx, batch_tx, QUIET_PERIOD));

        Ok((Self { _watcher: watcher }, batch_rx))
    }
}

/// Forward raw events as batches, each sent once `quiet` passes with no new
/// event. Returns when either channel closes.
fn coalesce(
    raw: mpsc::Receiver<notify::Event>,
    batches: async_mpsc::Sender<ChangeSet>,
    quiet: Duration,
) {
    let mut pending = ChangeSet::new();

    loop {
        let next = if pending.is_empty() {
            raw.recv().map_err(|_| RecvTimeoutError::Disconnected)
        } else {
            raw.recv_timeout(quiet)
        };

        match next {
            Ok(event) => {
                for change in event
                    .paths
                    .iter()
                    .filter_map(|path| WatchEvent::from_notify(path, &event.kind))
                {
                    if !pending.contains(&change) {
                        pending.push(change);
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if batches.blocking_send(mem::take(&mut pending)).is_err() {
                    return;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                if !pending.is_empty() {
                    let _ = batches.blocking_send(pending);
                }
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind};
    use std::fs;
    use std::thread;
    use tempfile::tempdir;

    fn modified(path: &str) -> notify::Event {
        notify::Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(PathBuf::from(path))
    }

    #[test]
    fn classifies_events() {
        let doc = Path::new("docs/LANGUAGE.md");
        let image = Path::new("public/logo.png");
        let modify = EventKind::Modify(ModifyKind::Data(DataChange::Content));

        assert_eq!(
            WatchEvent::from_notify(doc, &modify),
            Some(WatchEvent::DocModified(doc.to_path_buf()))
        );
        assert_eq!(
            WatchEvent::from_notify(image, &modify),
            Some(WatchEvent::Modified(image.to_path_buf()))
        );
        assert_eq!(
            WatchEvent::from_notify(doc, &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::Created(doc.to_path_buf()))
        );
        assert_eq!(WatchEvent::from_notify(doc, &EventKind::Any), None);
    }

    #[test]
    fn burst_is_delivered_as_one_batch() {
        let (raw_tx, raw_rx) = mpsc::channel();
        let (batch_tx, mut batch_rx) = async_mpsc::channel(4);
        let worker = thread::spawn(move || coalesce(raw_rx, batch_tx, Duration::from_millis(100)));

        raw_tx.send(modified("docs/a.md")).unwrap();
        thread::sleep(Duration::from_millis(20));
        raw_tx.send(modified("docs/b.md")).unwrap();
        raw_tx.send(modified("docs/a.md")).unwrap();

        let batch = batch_rx.blocking_recv().unwrap();
        assert_eq!(
            batch,
            vec![
                WatchEvent::DocModified(PathBuf::from("docs/a.md")),
                WatchEvent::DocModified(PathBuf::from("docs/b.md")),
            ]
        );

        drop(raw_tx);
        worker.join().unwrap();
        assert!(batch_rx.blocking_recv().is_none());
    }

    #[test]
    fn pending_changes_flush_on_shutdown() {
        let (raw_tx, raw_rx) = mpsc::channel();
        let (batch_tx, mut batch_rx) = async_mpsc::channel(4);

        raw_tx.send(modified("docs/a.md")).unwrap();
        drop(raw_tx);
        coalesce(raw_rx, batch_tx, Duration::from_secs(60));

        assert_eq!(
            batch_rx.blocking_recv().unwrap(),
            vec![WatchEvent::DocModified(PathBuf::from("docs/a.md"))]
        );
    }

    #[tokio::test]
    async fn reports_every_file_in_a_burst() {
        let temp = tempdir().unwrap();

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(temp.path().join("a.md"), "# A").unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        fs::write(temp.path().join("b.md"), "# B").unwrap();

        let mut seen = Vec::new();
        let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
        while !(seen.contains(&"a.md".to_string()) && seen.contains(&"b.md".to_string())) {
            let batch = tokio::time::timeout_at(deadline, rx.recv())
                .await
                .expect("timeout waiting for file watch events")
                .expect("channel should not be closed");
            seen.extend(batch.iter().filter_map(|change| {
                change
                    .path()
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            }));
        }

        drop(watcher);
    }
}
