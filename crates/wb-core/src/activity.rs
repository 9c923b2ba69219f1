//! Newest-first activity log kept in a reserved board (`loglog` by default).

use chrono::{DateTime, Local, SecondsFormat};

use crate::error::BoardError;
use crate::store::ContentStore;

/// Target recorded for actions that are not about one board.
pub const NO_TARGET: &str = "n/a";

/// Action kinds written by the manager.
pub mod action {
    pub const CREATED: &str = "created wb";
    pub const MODIFIED: &str = "modified wb";
    pub const DELETED: &str = "deleted wb";
    pub const RECOVERED: &str = "recovered wb";
    pub const EMPTIED_TRASH: &str = "emptied trash";
    pub const PUSHED: &str = "pushed";
    pub const BACKED_UP: &str = "backed up";
    pub const RESTORED: &str = "restored";

    #[must_use]
    pub fn duplicated_from(src: &str) -> String {
        format!("duplicated from {src}")
    }

    #[must_use]
    pub fn renamed_from(old: &str) -> String {
        format!("renamed from {old}")
    }
}

/// Render one log line.
#[must_use]
pub fn format_record(at: &DateTime<Local>, action: &str, target: &str) -> String {
    format!(
        "time: {}\taction: {action}\t name: {target}",
        at.to_rfc3339_opts(SecondsFormat::Secs, false)
    )
}

/// Activity log bound to a store and the log board's name.
#[derive(Debug, Clone, Copy)]
pub struct ActivityLog<'a> {
    store: &'a ContentStore,
    board: &'a str,
}

impl<'a> ActivityLog<'a> {
    #[must_use]
    pub const fn new(store: &'a ContentStore, board: &'a str) -> Self {
        Self { store, board }
    }

    /// Prepend a record stamped with the current local time.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] if the log cannot be created or rewritten.
    pub fn record(&self, action: &str, target: &str) -> Result<(), BoardError> {
        self.record_at(&Local::now(), action, target)
    }

    /// Prepend a record with an explicit timestamp, creating the log if absent.
    ///
    /// # Errors
    ///
    /// As [`ActivityLog::record`].
    pub fn record_at(
        &self,
        at: &DateTime<Local>,
        action: &str,
        target: &str,
    ) -> Result<(), BoardError> {
        if !self.store.exists(self.board) {
            self.store.write_lines::<&str>(&[], self.board)?;
        }
        self.store.prepend(self.board, &format_record(at, action, target))
    }

    /// All records, newest first. Empty when the log does not exist.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on read failure.
    pub fn entries(&self) -> Result<Vec<String>, BoardError> {
        match self.store.read_lines(self.board) {
            Ok(lines) => Ok(lines),
            Err(BoardError::NotFound { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Drop every record (used after a successful push).
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on write failure.
    pub fn clear(&self) -> Result<(), BoardError> {
        self.store.clear(self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PathResolver;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn record_layout() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 0)
            .single()
            .expect("unambiguous");
        let line = format_record(&at, action::MODIFIED, "wb");
        assert!(line.starts_with("time: 2024-03-09T14:05:00"));
        assert!(line.ends_with("\taction: modified wb\t name: wb"));
    }

    #[test]
    fn records_are_newest_first_and_log_autocreates() {
        let tmp = TempDir::new().expect("tempdir");
        let store = ContentStore::new(PathResolver::new(tmp.path()));
        store.ensure_layout().expect("layout");
        let log = ActivityLog::new(&store, "loglog");

        assert!(log.entries().expect("entries").is_empty());
        log.record(action::CREATED, "a").expect("record");
        log.record(&action::renamed_from("a"), "b").expect("record");

        let entries = log.entries().expect("entries");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].ends_with("action: renamed from a\t name: b"));
        assert!(entries[1].ends_with("action: created wb\t name: a"));

        log.clear().expect("clear");
        assert!(log.entries().expect("entries").is_empty());
        assert!(store.exists("loglog"));
    }
}
