//! Progress persistence: records how far through the module a user is.
//! The actual backend lives behind `ProgressStore`; guest sessions never
//! reach it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::error;
use serde::Serialize;

use crate::TransportError;
use fieldlab_config::Mode;

/// One persisted checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressRecord {
    pub module_id: u32,
    pub completion_percentage: f64,
    pub time_spent_secs: u64,
    pub score: u32,
}

/// Completion credit for having reached a mode: one fifth per tab.
pub fn completion_percentage(mode: Mode) -> f64 {
    (100.0 * (mode.index() as f64 + 1.0) / Mode::ALL.len() as f64).min(100.0)
}

pub trait ProgressStore {
    fn update(&mut self, record: &ProgressRecord) -> Result<(), TransportError>;
}

/// Accepts and discards every update.
pub struct NullProgressStore;

impl ProgressStore for NullProgressStore {
    fn update(&mut self, _record: &ProgressRecord) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Appends one JSON line per checkpoint to a file.
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProgressStore for FileProgressStore {
    fn update(&mut self, record: &ProgressRecord) -> Result<(), TransportError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

// --- Save Status ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Info,
    Error,
}

/// Transient user-facing save result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl SaveStatus {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

/// Owns the store and the guest flag; produces a `SaveStatus` for every
/// save attempt. A persistence failure never affects animation state.
pub struct ProgressTracker {
    store: Box<dyn ProgressStore>,
    guest: bool,
    module_id: u32,
}

impl ProgressTracker {
    pub fn new(store: Box<dyn ProgressStore>, guest: bool, module_id: u32) -> Self {
        Self { store, guest, module_id }
    }

    pub fn save(&mut self, mode: Mode, session_secs: u64) -> SaveStatus {
        if self.guest {
            // Guests short-circuit without touching the store at all
            return SaveStatus::new(StatusKind::Info, "Progress is not saved for guest sessions");
        }
        let record = ProgressRecord {
            module_id: self.module_id,
            completion_percentage: completion_percentage(mode),
            time_spent_secs: session_secs,
            score: 0,
        };
        match self.store.update(&record) {
            Ok(()) => SaveStatus::new(StatusKind::Success, "Progress saved"),
            Err(e) => {
                error!("Progress save failed: {e}");
                SaveStatus::new(StatusKind::Error, "Failed to save progress")
            }
        }
    }
}

/// Holds the latest save status and expires it automatically.
pub struct StatusBanner {
    ttl: Duration,
    current: Option<(SaveStatus, Instant)>,
}

impl StatusBanner {
    /// Statuses auto-clear after three seconds.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(3))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn show(&mut self, status: SaveStatus) {
        self.current = Some((status, Instant::now()));
    }

    pub fn current(&self) -> Option<&SaveStatus> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&SaveStatus> {
        match &self.current {
            Some((status, since)) if now.duration_since(*since) < self.ttl => Some(status),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingStore {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl ProgressStore for CountingStore {
        fn update(&mut self, _record: &ProgressRecord) -> Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(TransportError::Store("backend down".into()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn completion_rises_one_fifth_per_tab() {
        assert_eq!(completion_percentage(Mode::GaussE), 20.0);
        assert_eq!(completion_percentage(Mode::GaussB), 40.0);
        assert_eq!(completion_percentage(Mode::Faraday), 60.0);
        assert_eq!(completion_percentage(Mode::Ampere), 80.0);
        assert_eq!(completion_percentage(Mode::Wave), 100.0);
    }

    #[test]
    fn guest_save_never_calls_the_store() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = CountingStore { calls: calls.clone(), fail: false };
        let mut tracker = ProgressTracker::new(Box::new(store), true, 4);

        let status = tracker.save(Mode::Faraday, 120);
        assert_eq!(status.kind, StatusKind::Info);
        assert!(status.message.contains("not saved"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn save_reports_success_and_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let ok_store = CountingStore { calls: calls.clone(), fail: false };
        let mut tracker = ProgressTracker::new(Box::new(ok_store), false, 4);
        assert_eq!(tracker.save(Mode::Wave, 60).kind, StatusKind::Success);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let bad_store = CountingStore { calls: calls.clone(), fail: true };
        let mut tracker = ProgressTracker::new(Box::new(bad_store), false, 4);
        assert_eq!(tracker.save(Mode::Wave, 60).kind, StatusKind::Error);
    }

    #[test]
    fn file_store_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.jsonl");
        let mut store = FileProgressStore::new(&path);
        let record = ProgressRecord {
            module_id: 4,
            completion_percentage: 60.0,
            time_spent_secs: 90,
            score: 0,
        };
        store.update(&record).unwrap();
        store.update(&record).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains(r#""module_id":4"#));
    }

    #[test]
    fn banner_expires_after_ttl() {
        let mut banner = StatusBanner::new();
        assert!(banner.current().is_none());

        banner.show(SaveStatus::new(StatusKind::Success, "Progress saved"));
        let shown_at = Instant::now();
        assert!(banner.current_at(shown_at).is_some());
        assert!(banner
            .current_at(shown_at + Duration::from_secs(4))
            .is_none());

        banner.show(SaveStatus::new(StatusKind::Info, "x"));
        banner.clear();
        assert!(banner.current().is_none());
    }
}
