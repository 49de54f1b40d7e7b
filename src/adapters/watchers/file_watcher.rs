// SPDX-License-Identifier: MIT OR Apache-2.0

//! File system watcher for configuration source directories.
//!
//! This module provides a watcher that monitors the directory a `FileSource` serves
//! from and reports which category's document was modified.

use crate::domain::{ConfigCategory, ConfigError, Result, SourceNames};
use crate::ports::{ChangeCallback, ConfigWatcher};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// File system watcher for a directory of configuration documents.
///
/// Changes to files that do not correspond to any category are ignored. Debouncing is
/// trailing-edge and tracked per category: a burst of writes to `visuals.json` is
/// reported once, after the last write, and does not delay a change to
/// `behavior.json`.
///
/// # Examples
///
/// ```rust,no_run
/// use vib34d_config::adapters::FileWatcher;
/// use vib34d_config::domain::SourceNames;
/// use vib34d_config::ports::ConfigWatcher;
/// use std::sync::Arc;
///
/// # fn main() -> vib34d_config::domain::Result<()> {
/// let mut watcher = FileWatcher::new("/srv/vib34d/config", SourceNames::default(), None)?;
///
/// watcher.watch(Arc::new(|category| {
///     println!("{} changed", category);
/// }))?;
///
/// // Later, stop watching
/// watcher.stop()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileWatcher {
    /// Canonical directory being watched
    root: PathBuf,
    /// Maps relative file names back to categories
    source_names: SourceNames,
    /// Debounce delay (default 500ms)
    debounce_delay: Duration,
    /// Internal watcher
    watcher: Option<RecommendedWatcher>,
    /// Thread handle for the watcher thread
    watch_thread: Option<JoinHandle<()>>,
    /// Stop signal sender
    stop_tx: Option<Sender<()>>,
}

impl FileWatcher {
    /// Creates a new watcher for the directory `root`.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory holding the source documents
    /// * `source_names` - The names documents are served under, relative to `root`
    /// * `debounce_delay` - Optional debounce delay (default 500ms)
    pub fn new(
        root: impl AsRef<Path>,
        source_names: SourceNames,
        debounce_delay: Option<Duration>,
    ) -> Result<Self> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|e| ConfigError::WatcherError {
            message: format!("Directory does not exist: {}", root.display()),
            source: Some(Box::new(e)),
        })?;

        if !root.is_dir() {
            return Err(ConfigError::WatcherError {
                message: format!("Not a directory: {}", root.display()),
                source: None,
            });
        }

        Ok(Self {
            root,
            source_names,
            debounce_delay: debounce_delay.unwrap_or(Duration::from_millis(500)),
            watcher: None,
            watch_thread: None,
            stop_tx: None,
        })
    }

    /// Returns the directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn needs_recursion(&self) -> bool {
        ConfigCategory::ALL
            .iter()
            .any(|c| Path::new(self.source_names.get(*c)).components().count() > 1)
    }
}

/// How often the watcher thread checks for stop requests and due changes.
const TICK: Duration = Duration::from_millis(50);

/// Trailing-edge debounce state with one deadline per category.
///
/// Every change pushes the category's deadline out to `delay` from now; the category
/// is reported once its deadline passes with no further changes.
#[derive(Debug)]
struct Debouncer {
    delay: Duration,
    pending: HashMap<ConfigCategory, Instant>,
}

impl Debouncer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    fn record(&mut self, category: ConfigCategory, now: Instant) {
        self.pending.insert(category, now + self.delay);
    }

    /// Removes and returns the categories whose deadline has passed, in category order.
    fn take_due(&mut self, now: Instant) -> Vec<ConfigCategory> {
        let mut due: Vec<ConfigCategory> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(category, _)| *category)
            .collect();
        due.sort_unstable();
        for category in &due {
            self.pending.remove(category);
        }
        due
    }
}

/// Maps an absolute event path to the category served from it.
fn category_for_path(root: &Path, names: &SourceNames, path: &Path) -> Option<ConfigCategory> {
    let relative = path.strip_prefix(root).ok()?;
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    names.category_for(&relative)
}

impl ConfigWatcher for FileWatcher {
    fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
        if self.watcher.is_some() {
            return Err(ConfigError::WatcherError {
                message: "Watcher is already running".to_string(),
                source: None,
            });
        }

        let (event_tx, event_rx) = channel::<notify::Result<Event>>();
        let (stop_tx, stop_rx) = channel::<()>();

        let mut watcher =
            RecommendedWatcher::new(event_tx, notify::Config::default()).map_err(|e| {
                ConfigError::WatcherError {
                    message: format!("Failed to create file watcher: {}", e),
                    source: Some(Box::new(e)),
                }
            })?;

        let mode = if self.needs_recursion() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        watcher
            .watch(&self.root, mode)
            .map_err(|e| ConfigError::WatcherError {
                message: format!("Failed to start watching: {}", e),
                source: Some(Box::new(e)),
            })?;

        self.watcher = Some(watcher);
        self.stop_tx = Some(stop_tx);

        let root = self.root.clone();
        let names = self.source_names.clone();
        let debounce_delay = self.debounce_delay;

        let watch_thread = thread::spawn(move || {
            let mut debouncer = Debouncer::new(debounce_delay);

            loop {
                if stop_rx.try_recv().is_ok() {
                    break;
                }

                match event_rx.recv_timeout(TICK) {
                    Ok(Ok(event)) if !event.kind.is_access() => {
                        for path in &event.paths {
                            if let Some(category) = category_for_path(&root, &names, path) {
                                tracing::debug!(
                                    "Source for {} changed: {}",
                                    category,
                                    path.display()
                                );
                                debouncer.record(category, Instant::now());
                            }
                        }
                    }
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => tracing::warn!("File watcher error: {}", e),
                    Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
                    Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
                }

                for category in debouncer.take_due(Instant::now()) {
                    callback(category);
                }
            }
        });

        self.watch_thread = Some(watch_thread);

        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Some(handle) = self.watch_thread.take() {
            handle.join().map_err(|_| ConfigError::WatcherError {
                message: "Failed to join watcher thread".to_string(),
                source: None,
            })?;
        }

        self.watcher = None;

        Ok(())
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[test]
    fn test_file_watcher_new() {
        let dir = TempDir::new().unwrap();
        let watcher = FileWatcher::new(dir.path(), SourceNames::default(), None);
        assert!(watcher.is_ok());
    }

    #[test]
    fn test_file_watcher_nonexistent_dir() {
        let watcher = FileWatcher::new("/nonexistent/vib34d", SourceNames::default(), None);
        assert!(watcher.is_err());
    }

    #[test]
    fn test_file_watcher_rejects_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let watcher = FileWatcher::new(file.path(), SourceNames::default(), None);
        assert!(watcher.is_err());
    }

    #[test]
    fn test_category_for_path() {
        let root = Path::new("/srv/config");
        let mut names = SourceNames::default();
        names.set(ConfigCategory::Visuals, "themes/visuals.json");

        assert_eq!(
            category_for_path(root, &names, Path::new("/srv/config/behavior.json")),
            Some(ConfigCategory::Behavior)
        );
        assert_eq!(
            category_for_path(root, &names, Path::new("/srv/config/themes/visuals.json")),
            Some(ConfigCategory::Visuals)
        );
        assert_eq!(
            category_for_path(root, &names, Path::new("/srv/config/visuals.json")),
            None
        );
        assert_eq!(
            category_for_path(root, &names, Path::new("/elsewhere/behavior.json")),
            None
        );
    }

    #[test]
    fn test_needs_recursion() {
        let dir = TempDir::new().unwrap();
        let flat = FileWatcher::new(dir.path(), SourceNames::default(), None).unwrap();
        assert!(!flat.needs_recursion());

        let mut names = SourceNames::default();
        names.set(ConfigCategory::Layout, "pages/layout.json");
        let nested = FileWatcher::new(dir.path(), names, None).unwrap();
        assert!(nested.needs_recursion());
    }

    #[test]
    fn test_file_watcher_watch_and_stop() {
        let dir = TempDir::new().unwrap();
        let mut watcher = FileWatcher::new(dir.path(), SourceNames::default(), None).unwrap();

        assert!(watcher.watch(Arc::new(|_category| {})).is_ok());
        assert!(watcher.stop().is_ok());
    }

    #[test]
    fn test_file_watcher_double_watch() {
        let dir = TempDir::new().unwrap();
        let mut watcher = FileWatcher::new(dir.path(), SourceNames::default(), None).unwrap();

        let callback: ChangeCallback = Arc::new(|_category| {});

        assert!(watcher.watch(callback.clone()).is_ok());
        assert!(watcher.watch(callback).is_err());

        watcher.stop().unwrap();
    }

    #[test]
    fn test_file_watcher_reports_changed_category() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("visuals.json");
        fs::write(&path, "{}").unwrap();

        let mut watcher = FileWatcher::new(
            dir.path(),
            SourceNames::default(),
            Some(Duration::from_millis(100)),
        )
        .unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        watcher
            .watch(Arc::new(move |category| {
                seen_clone.lock().unwrap().push(category);
            }))
            .unwrap();

        thread::sleep(Duration::from_millis(100));
        fs::write(&path, "{\"themes\": []}").unwrap();
        thread::sleep(Duration::from_millis(500));

        watcher.stop().unwrap();

        // File system notification timing varies across platforms; only check what
        // was reported, not that something was.
        let seen = seen.lock().unwrap();
        assert!(seen.iter().all(|c| *c == ConfigCategory::Visuals));
    }

    #[test]
    fn test_debouncer_reports_after_quiet_period() {
        let start = Instant::now();
        let delay = Duration::from_millis(500);
        let mut debouncer = Debouncer::new(delay);

        debouncer.record(ConfigCategory::StateMap, start);
        assert!(debouncer.take_due(start + Duration::from_millis(100)).is_empty());

        // A second change inside the window pushes the deadline out
        debouncer.record(ConfigCategory::StateMap, start + Duration::from_millis(150));
        assert!(debouncer.take_due(start + Duration::from_millis(550)).is_empty());

        assert_eq!(
            debouncer.take_due(start + Duration::from_millis(650)),
            vec![ConfigCategory::StateMap]
        );
        assert!(debouncer.take_due(start + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_debouncer_tracks_categories_separately() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.record(ConfigCategory::Visuals, start);
        debouncer.record(ConfigCategory::Behavior, start + Duration::from_millis(80));
        debouncer.record(ConfigCategory::Layout, start + Duration::from_millis(10));

        assert_eq!(
            debouncer.take_due(start + Duration::from_millis(120)),
            vec![ConfigCategory::Layout, ConfigCategory::Visuals]
        );
        assert_eq!(
            debouncer.take_due(start + Duration::from_millis(200)),
            vec![ConfigCategory::Behavior]
        );
    }

    #[test]
    fn test_file_watcher_custom_debounce() {
        let dir = TempDir::new().unwrap();
        let watcher = FileWatcher::new(
            dir.path(),
            SourceNames::default(),
            Some(Duration::from_secs(1)),
        )
        .unwrap();

        assert_eq!(watcher.debounce_delay, Duration::from_secs(1));
    }
}
