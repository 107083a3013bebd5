//! Reload the imported file when it changes on disk.
//!
//! The parent directory is watched rather than the file itself, because
//! editors that save by rename would otherwise detach the watch.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches one file and reports settled changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    dir: PathBuf,
    file: PathBuf,
    file_name: Option<OsString>,
    settle: Duration,
    fire_at: Option<Instant>,
}

impl FileWatcher {
    /// # Errors
    /// Returns an error if the platform watcher cannot be created or the
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, settle: Duration) -> notify::Result<Self> {
        let path = path.as_ref();
        // Event paths are canonical; match them against a canonical target.
        let file = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let file_name = file.file_name().map(std::ffi::OsStr::to_os_string);
        let dir = parent_dir(&file);

        let (tx, events) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(file = %file.display(), "watching file");

        Ok(Self {
            _watcher: watcher,
            events,
            dir,
            file,
            file_name,
            settle,
            fire_at: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Drain pending events; true once a change has been quiet for the
    /// settle delay. Each new event pushes the deadline back.
    pub fn poll_change(&mut self, now: Instant) -> bool {
        while let Ok(event) = self.events.try_recv() {
            match event {
                Ok(event) if self.concerns_file(&event) => {
                    self.fire_at = Some(now + self.settle);
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(%err, "file watcher error"),
            }
        }
        match self.fire_at {
            Some(at) if now >= at => {
                self.fire_at = None;
                true
            }
            _ => false,
        }
    }

    fn concerns_file(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.dir
                || path == &self.file
                || self
                    .file_name
                    .as_ref()
                    .is_some_and(|name| path.file_name() == Some(name.as_os_str()))
        })
    }
}

impl std::fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatcher")
            .field("file", &self.file)
            .field("settle", &self.settle)
            .finish_non_exhaustive()
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
