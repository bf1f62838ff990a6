pub mod remover;

pub use remover::{Elevation, FsRemover, Remover};

use crate::error::RemovalError;
use crate::history::HistoryLogger;
use crate::model::SelectableItem;
use crate::safety::{PathClass, SafetyChecker};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalStatus {
    Removed,
    /// Container contents removed, the OS-protected shell remains.
    Partial,
    DryRun,
    Failed(String),
}

impl RemovalStatus {
    pub fn is_success(&self) -> bool {
        !matches!(self, RemovalStatus::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct ItemOutcome {
    pub path: PathBuf,
    pub size: u64,
    pub status: RemovalStatus,
}

#[derive(Debug, Clone)]
pub struct CleanResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub total_freed: u64,
    pub outcomes: Vec<ItemOutcome>,
    pub duration: Duration,
}

impl CleanResult {
    pub fn new() -> Self {
        Self {
            success_count: 0,
            failed_count: 0,
            total_freed: 0,
            outcomes: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn failed_items(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            RemovalStatus::Failed(msg) => Some((o.path.as_path(), msg.as_str())),
            _ => None,
        })
    }

    pub fn partial_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == RemovalStatus::Partial)
            .count()
    }

    fn record(&mut self, outcome: ItemOutcome) {
        if outcome.status.is_success() {
            self.success_count += 1;
            self.total_freed += outcome.size;
        } else {
            self.failed_count += 1;
        }
        self.outcomes.push(outcome);
    }
}

impl Default for CleanResult {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    pub dry_run: bool,
    pub log_history: bool,
}

/// Removes confirmed items one at a time, choosing a strategy per path class.
pub struct DeletionExecutor {
    remover: Box<dyn Remover>,
    safety: SafetyChecker,
    elevation: Elevation,
    history: Option<HistoryLogger>,
    dry_run: bool,
}

impl DeletionExecutor {
    pub fn new(remover: Box<dyn Remover>, home: &Path, elevation: Elevation) -> Self {
        Self {
            remover,
            safety: SafetyChecker::new(home),
            elevation,
            history: None,
            dry_run: false,
        }
    }

    pub fn with_options(mut self, options: CleanOptions) -> Self {
        self.dry_run = options.dry_run;
        self.history = options.log_history.then(HistoryLogger::new);
        self
    }

    pub fn with_history(mut self, history: HistoryLogger) -> Self {
        self.history = Some(history);
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Attempts every item; a failure never stops the batch.
    pub fn execute(&self, items: &[SelectableItem]) -> CleanResult {
        let start = Instant::now();
        let mut result = CleanResult::new();

        for item in items {
            let status = self.remove_item(&item.path);

            match &status {
                RemovalStatus::Failed(msg) => {
                    warn!(path = %item.path.display(), error = %msg, "removal failed");
                }
                RemovalStatus::Partial => {
                    warn!(path = %item.path.display(), "container shell is protected; contents removed");
                }
                RemovalStatus::Removed => {
                    info!(path = %item.path.display(), size = item.size, "removed");
                }
                RemovalStatus::DryRun => {
                    info!(path = %item.path.display(), "[DRY-RUN] would remove");
                }
            }

            self.log_history(&item.path, item.size, &status);

            result.record(ItemOutcome {
                path: item.path.clone(),
                size: item.size,
                status,
            });
        }

        result.duration = start.elapsed();
        info!(
            removed = result.success_count,
            failed = result.failed_count,
            freed = result.total_freed,
            "deletion batch finished"
        );
        result
    }

    fn remove_item(&self, path: &Path) -> RemovalStatus {
        if !self.safety.is_safe_to_delete(path) {
            return RemovalStatus::Failed(RemovalError::Protected(path.to_path_buf()).to_string());
        }

        if self.dry_run {
            return RemovalStatus::DryRun;
        }

        match self.safety.classify(path) {
            PathClass::ProtectedContainer => self.remove_container(path),
            PathClass::System if self.elevation.is_granted() => {
                into_status(self.remover.remove_elevated(path))
            }
            PathClass::System | PathClass::Ordinary => into_status(self.remover.remove(path, true)),
        }
    }

    fn remove_container(&self, path: &Path) -> RemovalStatus {
        let inner = path.join("Data");
        let inner_removed = match self.remover.remove(&inner, true) {
            Ok(()) => true,
            Err(e) => {
                debug!(path = %inner.display(), error = %e, "container data not removed");
                false
            }
        };

        match self.remover.remove(path, true) {
            Ok(()) => RemovalStatus::Removed,
            Err(_) if inner_removed => RemovalStatus::Partial,
            Err(e) => RemovalStatus::Failed(e.to_string()),
        }
    }

    fn log_history(&self, path: &Path, size: u64, status: &RemovalStatus) {
        let action = match status {
            RemovalStatus::Removed => "DELETE",
            RemovalStatus::Partial => "PARTIAL",
            RemovalStatus::DryRun | RemovalStatus::Failed(_) => return,
        };

        if let Some(history) = &self.history {
            if let Err(e) = history.log_removal(action, path, size) {
                debug!(error = %e, "history write failed");
            }
        }
    }
}

fn into_status(result: Result<(), RemovalError>) -> RemovalStatus {
    match result {
        Ok(()) => RemovalStatus::Removed,
        Err(e) => RemovalStatus::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::io;
    use std::rc::Rc;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Remove(PathBuf),
        Elevated(PathBuf),
    }

    /// Fails for the listed paths, records every call.
    struct ScriptedRemover {
        failing: HashSet<PathBuf>,
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl ScriptedRemover {
        fn new(failing: &[&str]) -> (Self, Rc<RefCell<Vec<Call>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            let remover = Self {
                failing: failing.iter().map(PathBuf::from).collect(),
                calls: Rc::clone(&calls),
            };
            (remover, calls)
        }

        fn outcome(&self, path: &Path) -> Result<(), RemovalError> {
            if self.failing.contains(path) {
                Err(RemovalError::io(
                    path,
                    io::Error::new(io::ErrorKind::PermissionDenied, "Operation not permitted"),
                ))
            } else {
                Ok(())
            }
        }
    }

    impl Remover for ScriptedRemover {
        fn remove(&self, path: &Path, _recursive: bool) -> Result<(), RemovalError> {
            self.calls.borrow_mut().push(Call::Remove(path.to_path_buf()));
            self.outcome(path)
        }

        fn remove_elevated(&self, path: &Path) -> Result<(), RemovalError> {
            self.calls.borrow_mut().push(Call::Elevated(path.to_path_buf()));
            self.outcome(path)
        }
    }

    const HOME: &str = "/Users/me";
    const CONTAINER: &str = "/Users/me/Library/Containers/com.old.app";
    const CONTAINER_DATA: &str = "/Users/me/Library/Containers/com.old.app/Data";

    fn item(path: &str, size: u64) -> SelectableItem {
        SelectableItem::new(path.rsplit('/').next().unwrap(), PathBuf::from(path), size)
    }

    fn executor(remover: ScriptedRemover, elevation: Elevation) -> DeletionExecutor {
        DeletionExecutor::new(Box::new(remover), Path::new(HOME), elevation)
    }

    #[test]
    fn test_partial_container_counts_as_success() {
        let (remover, calls) = ScriptedRemover::new(&[CONTAINER]);
        let result = executor(remover, Elevation::none()).execute(&[item(CONTAINER, 5000)]);

        assert_eq!(result.success_count, 1);
        assert_eq!(result.failed_count, 0);
        assert_eq!(result.total_freed, 5000);
        assert_eq!(result.outcomes[0].status, RemovalStatus::Partial);
        assert_eq!(result.partial_count(), 1);
        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Remove(PathBuf::from(CONTAINER_DATA)),
                Call::Remove(PathBuf::from(CONTAINER))
            ]
        );
    }

    #[test]
    fn test_container_fully_removed() {
        let (remover, _) = ScriptedRemover::new(&[]);
        let result = executor(remover, Elevation::none()).execute(&[item(CONTAINER, 10)]);
        assert_eq!(result.outcomes[0].status, RemovalStatus::Removed);
    }

    #[test]
    fn test_container_both_fail() {
        let (remover, _) = ScriptedRemover::new(&[CONTAINER, CONTAINER_DATA]);
        let result = executor(remover, Elevation::none()).execute(&[item(CONTAINER, 10)]);
        assert_eq!(result.failed_count, 1);
        assert_eq!(result.total_freed, 0);
        assert!(matches!(result.outcomes[0].status, RemovalStatus::Failed(_)));
    }

    #[test]
    fn test_outer_removed_even_when_inner_fails() {
        let (remover, _) = ScriptedRemover::new(&[CONTAINER_DATA]);
        let result = executor(remover, Elevation::none()).execute(&[item(CONTAINER, 10)]);
        assert_eq!(result.outcomes[0].status, RemovalStatus::Removed);
    }

    #[test]
    fn test_system_path_uses_elevation_when_granted() {
        let path = "/Library/LaunchDaemons/com.old.helper.plist";

        let (remover, calls) = ScriptedRemover::new(&[]);
        executor(remover, Elevation::granted()).execute(&[item(path, 2048)]);
        assert_eq!(*calls.borrow(), vec![Call::Elevated(PathBuf::from(path))]);

        let (remover, calls) = ScriptedRemover::new(&[]);
        executor(remover, Elevation::none()).execute(&[item(path, 2048)]);
        assert_eq!(*calls.borrow(), vec![Call::Remove(PathBuf::from(path))]);
    }

    #[test]
    fn test_home_path_never_elevated() {
        let path = "/Users/me/Library/Caches/OldApp";
        let (remover, calls) = ScriptedRemover::new(&[]);
        executor(remover, Elevation::granted()).execute(&[item(path, 2048)]);
        assert_eq!(*calls.borrow(), vec![Call::Remove(PathBuf::from(path))]);
    }

    #[test]
    fn test_failures_do_not_abort_batch() {
        let bad = "/Users/me/Library/Caches/Locked";
        let (remover, calls) = ScriptedRemover::new(&[bad]);
        let items = vec![
            item("/Users/me/Library/Caches/A", 100),
            item(bad, 200),
            item("/Users/me/Library/Logs/B", 300),
        ];

        let result = executor(remover, Elevation::none()).execute(&items);

        assert_eq!(calls.borrow().len(), 3);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.failed_count, 1);
        assert_eq!(result.total_freed, 400);

        let failed: Vec<_> = result.failed_items().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, Path::new(bad));
        assert!(failed[0].1.contains("Operation not permitted"));
    }

    #[test]
    fn test_protected_path_refused_without_remover_call() {
        let (remover, calls) = ScriptedRemover::new(&[]);
        let result =
            executor(remover, Elevation::granted()).execute(&[item("/System/Library/Foo", 10)]);

        assert!(calls.borrow().is_empty());
        assert_eq!(result.failed_count, 1);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let (remover, calls) = ScriptedRemover::new(&[]);
        let exec = executor(remover, Elevation::none()).with_options(CleanOptions {
            dry_run: true,
            log_history: false,
        });

        let result = exec.execute(&[item("/Users/me/Library/Caches/A", 100)]);
        assert!(calls.borrow().is_empty());
        assert_eq!(result.outcomes[0].status, RemovalStatus::DryRun);
        assert_eq!(result.success_count, 1);
    }

    #[test]
    fn test_real_removal_is_logged_to_history() {
        let home = tempdir().unwrap();
        let target = home.path().join("Library/Caches/OldApp");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("blob"), vec![0u8; 2048]).unwrap();
        let history_path = home.path().join("history.log");

        let exec = DeletionExecutor::new(Box::new(FsRemover), home.path(), Elevation::none())
            .with_history(HistoryLogger::at(history_path.clone()));
        let result = exec.execute(&[SelectableItem::new("OldApp", target.clone(), 2048)]);

        assert_eq!(result.success_count, 1);
        assert!(!target.exists());

        let entries = HistoryLogger::at(history_path).read_history(None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "DELETE");
        assert_eq!(entries[0].path, target);
    }
}
