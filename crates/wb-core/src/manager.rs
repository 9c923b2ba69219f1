//! The board repository manager.
//!
//! [`BoardManager`] is the one entry point the CLI talks to. Each mutating
//! operation runs its sub-steps in order (file, then list index, then
//! activity log) and stops at the first failing step; nothing is rolled
//! back. A failing activity-log write does not fail the operation. It is
//! handed back in [`Logged::log_failure`] for the caller to report.

use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};
use tracing::{info, warn};

use crate::activity::{ActivityLog, NO_TARGET, action};
use crate::config::WbConfig;
use crate::error::BoardError;
use crate::list_index::{ListIndex, RemoveOutcome};
use crate::paths::{Area, PathResolver};
use crate::session::{EditOutcome, EditSession, Editor};
use crate::shortcuts::Shortcuts;
use crate::special::{ReservedNames, SpecialBoard};
use crate::stats::{self, StatsReport};
use crate::store::ContentStore;
use crate::trash::Trash;
use crate::vcs::{BulkSync, Publisher, VcsStats};

/// Result of a mutating operation plus any activity-log failure.
#[derive(Debug)]
pub struct Logged<T> {
    pub value: T,
    pub log_failure: Option<BoardError>,
}

impl<T> Logged<T> {
    const fn clean(value: T) -> Self {
        Self {
            value,
            log_failure: None,
        }
    }

    fn absorb(mut self, failure: Option<BoardError>) -> Self {
        if self.log_failure.is_none() {
            self.log_failure = failure;
        }
        self
    }
}

/// Board content returned by [`BoardManager::view`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub name: String,
    pub content: Vec<u8>,
    /// The default board did not exist and was created by this call.
    pub created: bool,
}

/// What [`BoardManager::list`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// Lines of the list index board.
    Index(Vec<String>),
    /// No index board; names of the files under `boards/`.
    Directory(Vec<String>),
}

impl Listing {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        match self {
            Self::Index(lines) | Self::Directory(lines) => lines,
        }
    }
}

/// Coordinates boards, list index, trash, shortcuts and the activity log
/// under one repository root.
#[derive(Debug, Clone)]
pub struct BoardManager {
    store: ContentStore,
    reserved: ReservedNames,
}

impl BoardManager {
    /// Open a repository, creating `boards/` and `trash/` if missing.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] if the layout cannot be created.
    pub fn open(root: impl Into<PathBuf>, reserved: ReservedNames) -> Result<Self, BoardError> {
        let store = ContentStore::new(PathResolver::new(root));
        store.ensure_layout()?;
        Ok(Self { store, reserved })
    }

    /// # Errors
    ///
    /// As [`BoardManager::open`].
    pub fn from_config(config: &WbConfig) -> Result<Self, BoardError> {
        Self::open(config.root.clone(), config.reserved.clone())
    }

    #[must_use]
    pub const fn store(&self) -> &ContentStore {
        &self.store
    }

    #[must_use]
    pub const fn reserved(&self) -> &ReservedNames {
        &self.reserved
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.store.paths().root()
    }

    #[must_use]
    pub fn list_index(&self) -> ListIndex<'_> {
        ListIndex::new(&self.store, self.reserved.name_of(SpecialBoard::ListIndex))
    }

    #[must_use]
    pub fn shortcuts(&self) -> Shortcuts<'_> {
        Shortcuts::new(&self.store, self.reserved.name_of(SpecialBoard::Shortcuts))
    }

    #[must_use]
    pub fn activity(&self) -> ActivityLog<'_> {
        ActivityLog::new(&self.store, self.reserved.name_of(SpecialBoard::ActivityLog))
    }

    #[must_use]
    pub fn trash(&self) -> Trash<'_> {
        Trash::new(self.store.paths())
    }

    fn record(&self, action: &str, target: &str) -> Option<BoardError> {
        match self.activity().record(action, target) {
            Ok(()) => None,
            Err(e) => {
                warn!(action, target, error = %e, "activity log write failed");
                Some(e)
            }
        }
    }

    /// A new live board may not shadow a trashed one.
    fn ensure_trash_slot_free(&self, name: &str) -> Result<(), BoardError> {
        if self.trash().contains(name) {
            return Err(BoardError::TrashConflict { name: name.to_string() });
        }
        Ok(())
    }

    fn logged<T>(&self, value: T, action: &str, target: &str) -> Logged<T> {
        Logged {
            value,
            log_failure: self.record(action, target),
        }
    }

    /// The board `requested` refers to: itself if live, else its shortcut target.
    ///
    /// # Errors
    ///
    /// [`BoardError::ShortcutNotFound`] when it is neither.
    pub fn resolve_name(&self, requested: &str) -> Result<String, BoardError> {
        if self.store.exists(requested) {
            return Ok(requested.to_string());
        }
        self.shortcuts().resolve_alias(requested)
    }

    /// Create an empty board and announce it in the list index.
    ///
    /// # Errors
    ///
    /// [`BoardError::AlreadyExists`] for a live name, [`BoardError::TrashConflict`]
    /// for a trashed one, [`BoardError::ReservedName`] for system boards,
    /// [`BoardError::Io`] on write failure.
    pub fn create(&self, name: &str) -> Result<Logged<()>, BoardError> {
        self.reserved.ensure_user_writable(name)?;
        if self.store.exists(name) {
            return Err(BoardError::AlreadyExists { name: name.to_string() });
        }
        self.ensure_trash_slot_free(name)?;
        self.store.write_lines::<&str>(&[], name)?;
        self.list_index().add_entry(name)?;
        info!(board = name, "created board");
        Ok(self.logged((), action::CREATED, name))
    }

    /// Run an edit session; records a modification only when bytes changed.
    ///
    /// # Errors
    ///
    /// See [`EditSession::load`] and [`EditSession::edit`].
    pub fn edit(&self, requested: &str, editor: &dyn Editor) -> Result<Logged<EditOutcome>, BoardError> {
        let outcome = EditSession::load(&self.store, self.shortcuts(), requested)?
            .edit(editor)?
            .outcome();
        if outcome.modified {
            let target = outcome.name.clone();
            return Ok(self.logged(outcome, action::MODIFIED, &target));
        }
        Ok(Logged::clean(outcome))
    }

    /// Create a board, then open it for editing.
    ///
    /// # Errors
    ///
    /// As [`BoardManager::create`] and [`BoardManager::edit`]. A failed edit
    /// leaves the created board and its index entry in place.
    pub fn create_and_edit(&self, name: &str, editor: &dyn Editor) -> Result<Logged<EditOutcome>, BoardError> {
        let created = self.create(name)?;
        Ok(self.edit(name, editor)?.absorb(created.log_failure))
    }

    /// Content of a live board. The default board is created and opened for
    /// editing the first time it is viewed.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] for any other missing board.
    pub fn view(&self, name: &str, editor: &dyn Editor) -> Result<Logged<View>, BoardError> {
        let mut created = false;
        let mut log_failure = None;
        if !self.store.exists(name) {
            if self.reserved.classify(name) != Some(SpecialBoard::Default) {
                return Err(BoardError::NotFound { name: name.to_string() });
            }
            log_failure = self.create_and_edit(name, editor)?.log_failure;
            created = true;
        }

        let content = self.store.read_raw(name)?;
        Ok(Logged {
            value: View {
                name: name.to_string(),
                content,
                created,
            },
            log_failure,
        })
    }

    /// Prepend one entry to a board (or its shortcut target). A single pair
    /// of surrounding double quotes is stripped. Returns the board written.
    ///
    /// # Errors
    ///
    /// [`BoardError::ShortcutNotFound`] for unknown names,
    /// [`BoardError::ReservedName`] for system boards.
    pub fn fast_append(&self, requested: &str, entry: &str) -> Result<Logged<String>, BoardError> {
        let name = self.resolve_name(requested)?;
        self.reserved.ensure_user_writable(&name)?;

        let entry = strip_outer_quotes(entry);
        self.store.prepend(&name, entry)?;
        info!(board = %name, "prepended entry");
        let target = name.clone();
        Ok(self.logged(name, action::MODIFIED, &target))
    }

    /// Copy `src` to a new board `dst` and announce `dst` in the index.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`], [`BoardError::AlreadyExists`],
    /// [`BoardError::TrashConflict`] when `dst` is trashed, or
    /// [`BoardError::ReservedName`] for a reserved destination.
    pub fn duplicate(&self, src: &str, dst: &str) -> Result<Logged<()>, BoardError> {
        self.reserved.ensure_unreserved(dst)?;
        self.ensure_trash_slot_free(dst)?;
        self.store.copy(src, dst)?;
        self.list_index().add_entry(dst)?;
        info!(src, dst, "duplicated board");
        Ok(self.logged((), &action::duplicated_from(src), dst))
    }

    /// Rename a board and rewrite its index token in place.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`], [`BoardError::AlreadyExists`],
    /// [`BoardError::TrashConflict`] when `new` is trashed, or
    /// [`BoardError::ReservedName`].
    pub fn rename(&self, old: &str, new: &str) -> Result<Logged<()>, BoardError> {
        self.reserved.ensure_user_writable(old)?;
        self.reserved.ensure_unreserved(new)?;
        self.ensure_trash_slot_free(new)?;
        self.store.rename(old, new)?;
        if !self.list_index().rename_entry(old, new)? {
            info!(old, new, "no index token to rename");
        }
        info!(old, new, "renamed board");
        Ok(self.logged((), &action::renamed_from(old), new))
    }

    /// Soft-delete a board and drop it from the index.
    ///
    /// # Errors
    ///
    /// See [`Trash::soft_delete`]; [`BoardError::ReservedName`] for system boards.
    pub fn remove(&self, name: &str) -> Result<Logged<RemoveOutcome>, BoardError> {
        self.reserved.ensure_user_writable(name)?;
        self.trash().soft_delete(name)?;
        let outcome = self.list_index().remove_entry(name)?;
        info!(board = name, ?outcome, "deleted board");
        Ok(self.logged(outcome, action::DELETED, name))
    }

    /// Bring a board back from the trash and re-announce it in the index.
    ///
    /// # Errors
    ///
    /// See [`Trash::recover`].
    pub fn recover(&self, name: &str) -> Result<Logged<()>, BoardError> {
        self.trash().recover(name)?;
        self.list_index().add_entry(name)?;
        info!(board = name, "recovered board");
        Ok(self.logged((), action::RECOVERED, name))
    }

    /// Permanently delete everything in the trash.
    ///
    /// # Errors
    ///
    /// See [`Trash::purge_all`].
    pub fn empty_trash(&self) -> Result<Logged<usize>, BoardError> {
        let purged = self.trash().purge_all()?;
        Ok(self.logged(purged, action::EMPTIED_TRASH, NO_TARGET))
    }

    /// The list index if it exists, else a plain directory listing.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on read failure.
    pub fn list(&self) -> Result<Listing, BoardError> {
        let index = self.reserved.name_of(SpecialBoard::ListIndex);
        if self.store.exists(index) {
            return self.store.read_lines(index).map(Listing::Index);
        }
        self.store.board_names().map(Listing::Directory)
    }

    /// Activity log lines, newest first.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on read failure.
    pub fn log(&self) -> Result<Vec<String>, BoardError> {
        self.activity().entries()
    }

    /// Trashed board names.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on read failure.
    pub fn trashed(&self) -> Result<Vec<String>, BoardError> {
        self.trash().names()
    }

    /// Per-board churn report.
    ///
    /// # Errors
    ///
    /// See [`stats::aggregate`].
    pub fn stats(&self, vcs: &dyn VcsStats) -> Result<StatsReport, BoardError> {
        stats::aggregate(&self.store, vcs)
    }

    /// Commit and push the repository, then start a fresh activity log.
    /// Returns the commit message used.
    ///
    /// # Errors
    ///
    /// [`BoardError::Collaborator`] if the push fails (the log is kept).
    pub fn push(&self, message: Option<&str>, publisher: &dyn Publisher) -> Result<Logged<String>, BoardError> {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .map_or_else(
                || Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
                str::to_string,
            );
        publisher.commit_and_push(self.root(), &message)?;
        info!(%message, "pushed repository");

        let cleared = self.activity().clear().err();
        if let Some(e) = &cleared {
            warn!(error = %e, "failed to clear activity log after push");
        }
        Ok(self.logged(message, action::PUSHED, NO_TARGET).absorb(cleared))
    }

    /// Mirror `boards/` to object storage.
    ///
    /// # Errors
    ///
    /// [`BoardError::Collaborator`] on sync failure.
    pub fn backup(&self, sync: &dyn BulkSync) -> Result<Logged<()>, BoardError> {
        sync.upload(&self.store.paths().area_dir(Area::Boards))?;
        Ok(self.logged((), action::BACKED_UP, NO_TARGET))
    }

    /// Download object storage into `boards/`, overwriting same-named boards.
    ///
    /// # Errors
    ///
    /// [`BoardError::Collaborator`] on sync failure.
    pub fn restore(&self, sync: &dyn BulkSync) -> Result<Logged<()>, BoardError> {
        sync.download(&self.store.paths().area_dir(Area::Boards))?;
        Ok(self.logged((), action::RESTORED, NO_TARGET))
    }
}

fn strip_outer_quotes(entry: &str) -> &str {
    entry
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(entry)
}
