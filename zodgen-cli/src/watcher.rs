//! File watcher for development mode.
//!
//! Watches the schema file's directory and reports debounced change events
//! for the schema itself, so generation can be re-run on save. The directory
//! rather than the file is watched because editors commonly replace the file
//! on write.

use crate::error::{CliResult, WatchError};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// Event types for schema changes.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// The schema file was modified (or recreated).
    Modified(PathBuf),
    /// The schema file was deleted.
    Deleted(PathBuf),
    /// An error occurred.
    Error(String),
}

/// Watcher over a single schema file.
pub struct SchemaWatcher {
    /// Path of the schema file to watch.
    schema_path: PathBuf,
    /// Debounce duration in milliseconds.
    debounce_ms: u64,
}

impl SchemaWatcher {
    /// Create a new watcher for the given schema file.
    pub fn new(schema_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            debounce_ms: 500,
        }
    }

    /// Set the debounce duration in milliseconds.
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Start watching for changes to the schema file.
    ///
    /// Returns the debouncer (keep it alive for the watch to continue) and
    /// a receiver that yields watch events.
    pub fn watch(&self) -> CliResult<(Debouncer<RecommendedWatcher>, Receiver<WatchEvent>)> {
        let (tx, rx) = channel::<WatchEvent>();
        let schema_file: Option<OsString> = self.schema_path.file_name().map(OsString::from);

        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    for event in events {
                        let path = event.path;

                        // Only events for the schema file itself.
                        if path.file_name().map(OsString::from) != schema_file {
                            continue;
                        }

                        let watch_event = if path.exists() {
                            WatchEvent::Modified(path)
                        } else {
                            WatchEvent::Deleted(path)
                        };

                        let _ = tx.send(watch_event);
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            },
        )
        .map_err(|e| WatchError::Init(e.to_string()))?;

        debouncer
            .watcher()
            .watch(&self.watch_root(), RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::Init(e.to_string()))?;

        Ok((debouncer, rx))
    }

    /// Get the schema path being watched.
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    fn watch_root(&self) -> PathBuf {
        match self.schema_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl WatchEvent {
    /// Get the path associated with this event.
    pub fn path(&self) -> Option<&Path> {
        match self {
            WatchEvent::Modified(p) | WatchEvent::Deleted(p) => Some(p),
            WatchEvent::Error(_) => None,
        }
    }

    /// Check if this is an error event.
    pub fn is_error(&self) -> bool {
        matches!(self, WatchEvent::Error(_))
    }

    /// Get the error message if this is an error event.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            WatchEvent::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
