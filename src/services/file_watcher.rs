//! File watcher service for dev mode.
//!
//! Monitors the palette config file for changes and broadcasts debounced
//! events so the server can reload the palette and notify SSE clients.

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, Mutex};

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Event sent when the watched file changes
#[derive(Debug, Clone)]
pub struct FileChangeEvent {
    /// Paths that changed
    pub paths: Vec<PathBuf>,
}

/// Watches a single file through its parent directory
pub struct FileWatcher {
    sender: broadcast::Sender<FileChangeEvent>,
    /// Handle to the watcher (kept alive)
    _watcher: Option<RecommendedWatcher>,
    active: bool,
}

impl FileWatcher {
    /// Create a watcher for the given file.
    ///
    /// Must be called from within a tokio runtime. Editors often replace a
    /// file instead of writing it in place, so the parent directory is
    /// watched and events are filtered by file name.
    pub fn new(watch_file: Option<PathBuf>) -> Self {
        let (sender, _) = broadcast::channel(16);

        let (watcher, active) = match watch_file {
            Some(file) => match Self::start_watcher(&file, sender.clone()) {
                Ok(watcher) => {
                    tracing::info!(path = %file.display(), "File watcher started");
                    (Some(watcher), true)
                }
                Err(e) => {
                    tracing::warn!(path = %file.display(), error = %e, "Failed to start file watcher");
                    (None, false)
                }
            },
            None => {
                tracing::debug!("No config file configured, file watching disabled");
                (None, false)
            }
        };

        Self {
            sender,
            _watcher: watcher,
            active,
        }
    }

    fn start_watcher(
        file: &Path,
        sender: broadcast::Sender<FileChangeEvent>,
    ) -> Result<RecommendedWatcher, notify::Error> {
        let file_name: OsString = file
            .file_name()
            .ok_or_else(|| notify::Error::generic("watch path has no file name"))?
            .to_os_string();
        let dir = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            return Err(notify::Error::path_not_found().add_path(dir));
        }

        // Channel for raw events
        let (tx, mut rx) = mpsc::channel::<PathBuf>(100);

        tokio::spawn(async move {
            let pending: Arc<Mutex<HashSet<PathBuf>>> = Arc::new(Mutex::new(HashSet::new()));
            let pending_clone = pending.clone();

            let flush = tokio::spawn(async move {
                loop {
                    tokio::time::sleep(DEBOUNCE).await;
                    let mut guard = pending_clone.lock().await;
                    if !guard.is_empty() {
                        let paths: Vec<PathBuf> = guard.drain().collect();
                        tracing::debug!(paths = ?paths, "Files changed (debounced)");
                        let _ = sender.send(FileChangeEvent { paths });
                    }
                }
            });

            while let Some(path) = rx.recv().await {
                pending.lock().await.insert(path);
            }
            // Watcher dropped
            flush.abort();
        });

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        if path.file_name() == Some(file_name.as_os_str()) {
                            let _ = tx.blocking_send(path);
                        }
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(watcher)
    }

    /// Subscribe to file change events
    pub fn subscribe(&self) -> broadcast::Receiver<FileChangeEvent> {
        self.sender.subscribe()
    }

    /// Check if the watcher is active
    pub fn is_active(&self) -> bool {
        self.active
    }
}
