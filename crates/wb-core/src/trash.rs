//! Soft deletion: moving boards between `boards/` and `trash/`.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use tracing::{debug, info};

use crate::error::BoardError;
use crate::paths::{Area, PathResolver};
use crate::store::list_files;

/// Trash operations over one repository root.
#[derive(Debug, Clone, Copy)]
pub struct Trash<'a> {
    paths: &'a PathResolver,
}

impl<'a> Trash<'a> {
    #[must_use]
    pub const fn new(paths: &'a PathResolver) -> Self {
        Self { paths }
    }

    /// Whether `name` currently sits in the trash.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.paths.trashed(name).is_ok_and(|p| p.exists())
    }

    /// Trashed board names, sorted.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] if the trash directory cannot be read.
    pub fn names(&self) -> Result<Vec<String>, BoardError> {
        list_files(&self.paths.area_dir(Area::Trash))
    }

    /// Move a live board into the trash under the same name.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if `name` is not live,
    /// [`BoardError::TrashConflict`] if the trash slot is taken,
    /// [`BoardError::Io`] if the move fails.
    pub fn soft_delete(&self, name: &str) -> Result<(), BoardError> {
        let live = self.paths.board(name)?;
        if !live.is_file() {
            return Err(BoardError::NotFound { name: name.to_string() });
        }

        let trash_dir = self.paths.area_dir(Area::Trash);
        fs::create_dir_all(&trash_dir).map_err(|e| BoardError::io(&trash_dir, e))?;

        let trashed = self.paths.trashed(name)?;
        if trashed.exists() {
            return Err(BoardError::TrashConflict { name: name.to_string() });
        }
        fs::rename(&live, &trashed).map_err(|e| BoardError::io(&live, e))?;
        debug!(board = name, "moved board to trash");
        Ok(())
    }

    /// Move a trashed board back to `boards/`.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotInTrash`] if absent from the trash,
    /// [`BoardError::LiveConflict`] if a live board already has the name,
    /// [`BoardError::Io`] if the move fails.
    pub fn recover(&self, name: &str) -> Result<(), BoardError> {
        let trashed = self.paths.trashed(name)?;
        if !trashed.exists() {
            return Err(BoardError::NotInTrash { name: name.to_string() });
        }
        let live = self.paths.board(name)?;
        if live.exists() {
            return Err(BoardError::LiveConflict { name: name.to_string() });
        }
        fs::rename(&trashed, &live).map_err(|e| BoardError::io(&trashed, e))?;
        debug!(board = name, "recovered board from trash");
        Ok(())
    }

    /// Delete everything directly under `trash/`, files and directories alike.
    ///
    /// Stops at the first failure; entries removed before it stay removed.
    /// Returns the number of entries purged.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] for the first entry that could not be removed.
    pub fn purge_all(&self) -> Result<usize, BoardError> {
        self.purge_with(|path| {
            if path.is_dir() {
                fs::remove_dir_all(path)
            } else {
                fs::remove_file(path)
            }
        })
    }

    fn purge_with(
        &self,
        mut remove: impl FnMut(&Path) -> io::Result<()>,
    ) -> Result<usize, BoardError> {
        let dir = self.paths.area_dir(Area::Trash);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(BoardError::io(&dir, e)),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BoardError::io(&dir, e))?;
            paths.push(entry.path());
        }
        paths.sort();

        let mut purged = 0;
        for path in paths {
            remove(&path).map_err(|e| BoardError::io(&path, e))?;
            purged += 1;
        }
        info!(purged, "emptied trash");
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContentStore;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ContentStore) {
        let tmp = TempDir::new().expect("tempdir");
        let store = ContentStore::new(PathResolver::new(tmp.path()));
        store.ensure_layout().expect("layout");
        (tmp, store)
    }

    #[test]
    fn soft_delete_then_recover_preserves_bytes() {
        let (_tmp, store) = setup();
        let bytes = b"line one\r\nline two without newline";
        store.write_raw(bytes, "notes").expect("write");
        let trash = Trash::new(store.paths());

        trash.soft_delete("notes").expect("delete");
        assert!(!store.exists("notes"));
        assert!(trash.contains("notes"));

        trash.recover("notes").expect("recover");
        assert!(!trash.contains("notes"));
        assert_eq!(store.read_raw("notes").expect("read"), bytes);
    }

    #[test]
    fn soft_delete_requires_live_board() {
        let (_tmp, store) = setup();
        let err = Trash::new(store.paths()).soft_delete("ghost").expect_err("missing");
        assert!(matches!(err, BoardError::NotFound { .. }));
    }

    #[test]
    fn soft_delete_creates_missing_trash_dir() {
        let (tmp, store) = setup();
        fs::remove_dir(tmp.path().join("trash")).expect("rmdir");
        store.write_lines(&["x"], "b").expect("write");
        Trash::new(store.paths()).soft_delete("b").expect("delete");
        assert!(tmp.path().join("trash/b").is_file());
    }

    #[test]
    fn occupied_slots_conflict() {
        let (_tmp, store) = setup();
        let trash = Trash::new(store.paths());
        store.write_lines(&["old"], "b").expect("write");
        trash.soft_delete("b").expect("delete");
        store.write_lines(&["new"], "b").expect("write");

        let err = trash.soft_delete("b").expect_err("trash slot taken");
        assert!(matches!(err, BoardError::TrashConflict { .. }));
        let err = trash.recover("b").expect_err("live slot taken");
        assert!(matches!(err, BoardError::LiveConflict { .. }));

        assert_eq!(store.read_lines("b").expect("read"), vec!["new"]);
    }

    #[test]
    fn recover_missing_is_not_in_trash() {
        let (_tmp, store) = setup();
        let err = Trash::new(store.paths()).recover("ghost").expect_err("missing");
        assert!(matches!(err, BoardError::NotInTrash { .. }));
    }

    #[test]
    fn purge_removes_files_and_directories() {
        let (tmp, store) = setup();
        let trash = Trash::new(store.paths());
        for name in ["a", "b"] {
            store.write_lines(&[name], name).expect("write");
            trash.soft_delete(name).expect("delete");
        }
        fs::create_dir_all(tmp.path().join("trash/nested/deeper")).expect("mkdir");

        assert_eq!(trash.purge_all().expect("purge"), 3);
        assert_eq!(fs::read_dir(tmp.path().join("trash")).expect("read").count(), 0);
        assert_eq!(trash.purge_all().expect("purge again"), 0);
    }

    #[test]
    fn purge_stops_at_first_failure() {
        let (tmp, store) = setup();
        let trash = Trash::new(store.paths());
        for name in ["a", "b", "c"] {
            store.write_lines(&[name], name).expect("write");
            trash.soft_delete(name).expect("delete");
        }

        let mut attempted = Vec::new();
        let err = trash
            .purge_with(|path| {
                attempted.push(path.to_path_buf());
                if path.ends_with("b") {
                    return Err(io::Error::new(ErrorKind::PermissionDenied, "locked"));
                }
                fs::remove_file(path)
            })
            .expect_err("b fails");

        assert!(matches!(err, BoardError::Io { .. }));
        assert_eq!(attempted.len(), 2);
        assert!(!tmp.path().join("trash/a").exists());
        assert!(tmp.path().join("trash/b").exists());
        assert!(tmp.path().join("trash/c").exists());
    }
}
