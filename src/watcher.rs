use std::path::{Path, PathBuf};
use std::time::Duration;

use notify_debouncer_mini::{new_debouncer, DebouncedEvent, DebouncedEventKind};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::event::Event;

/// Watches a single tree-text file and reports when it changes.
///
/// The parent directory is watched (non-recursively) so that editors which
/// save by writing a new file and renaming it over the old one still
/// produce events.
pub struct SourceWatcher {
    /// Handle to the debouncer (dropped to stop watching).
    _debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
}

impl SourceWatcher {
    /// Start watching `file`. Changes are debounced by `debounce_duration`
    /// and delivered as [`Event::SourceChanged`].
    pub fn new(
        file: &Path,
        debounce_duration: Duration,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> notify::Result<Self> {
        let target = file.to_path_buf();
        let dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut debouncer = new_debouncer(
            debounce_duration,
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    if touches_target(&events, &target) {
                        debug!(path = %target.display(), "tree source changed");
                        let _ = event_tx.send(Event::SourceChanged);
                    }
                }
                Err(e) => warn!(error = %e, "watcher error"),
            },
        )?;

        debouncer
            .watcher()
            .watch(&dir, notify::RecursiveMode::NonRecursive)?;

        Ok(Self {
            _debouncer: debouncer,
        })
    }
}

/// Whether any debounced event refers to `target`.
fn touches_target(events: &[DebouncedEvent], target: &Path) -> bool {
    events
        .iter()
        .filter(|e| e.kind == DebouncedEventKind::Any)
        .any(|e| same_file(&e.path, target))
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.file_name().is_some() && a.file_name() == b.file_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(path: &str, kind: DebouncedEventKind) -> DebouncedEvent {
        DebouncedEvent {
            path: PathBuf::from(path),
            kind,
        }
    }

    #[test]
    fn matches_target_path() {
        let events = vec![event("/tmp/x/tree.txt", DebouncedEventKind::Any)];
        assert!(touches_target(&events, Path::new("/tmp/x/tree.txt")));
    }

    #[test]
    fn ignores_sibling_files() {
        let events = vec![event("/tmp/x/other.txt", DebouncedEventKind::Any)];
        assert!(!touches_target(&events, Path::new("/tmp/x/tree.txt")));
    }

    #[test]
    fn ignores_continuous_events() {
        let events = vec![event("/tmp/x/tree.txt", DebouncedEventKind::AnyContinuous)];
        assert!(!touches_target(&events, Path::new("/tmp/x/tree.txt")));
    }

    #[test]
    fn matches_relative_and_absolute_forms() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("tree.txt");
        std::fs::write(&file, "a\n").expect("write");
        let dotted = dir.path().join(".").join("tree.txt");
        assert!(same_file(&dotted, &file));
    }
}
