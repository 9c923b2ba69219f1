//! Mapping from logical board names to files under the repository root.
//!
//! ```text
//! <root>/
//!   boards/    # live boards, one file per board
//!   trash/     # soft-deleted boards, same file names
//! ```
//!
//! Resolution is a pure join. Nothing here touches the filesystem; directory
//! creation belongs to [`crate::store::ContentStore::ensure_layout`].

use std::path::{Path, PathBuf};

use crate::error::BoardError;

/// Directory name for live boards.
pub const BOARDS_DIR: &str = "boards";
/// Directory name for soft-deleted boards.
pub const TRASH_DIR: &str = "trash";

/// Which half of the repository a name is resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Boards,
    Trash,
}

impl Area {
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Boards => BOARDS_DIR,
            Self::Trash => TRASH_DIR,
        }
    }
}

/// Resolves board names to concrete paths under a fixed root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every entry of `area`.
    #[must_use]
    pub fn area_dir(&self, area: Area) -> PathBuf {
        self.root.join(area.dir_name())
    }

    /// Path of `name` inside `area`. Validates the name, never checks existence.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidName`] when `name` would escape the area
    /// directory or cannot be a single file name.
    pub fn resolve(&self, area: Area, name: &str) -> Result<PathBuf, BoardError> {
        validate_board_name(name)?;
        Ok(self.area_dir(area).join(name))
    }

    /// Shorthand for `resolve(Area::Boards, name)`.
    ///
    /// # Errors
    ///
    /// See [`PathResolver::resolve`].
    pub fn board(&self, name: &str) -> Result<PathBuf, BoardError> {
        self.resolve(Area::Boards, name)
    }

    /// Shorthand for `resolve(Area::Trash, name)`.
    ///
    /// # Errors
    ///
    /// See [`PathResolver::resolve`].
    pub fn trashed(&self, name: &str) -> Result<PathBuf, BoardError> {
        self.resolve(Area::Trash, name)
    }
}

/// Check that `name` is usable as a single file name inside an area directory.
///
/// # Errors
///
/// Returns [`BoardError::InvalidName`] describing the first violated rule.
pub fn validate_board_name(name: &str) -> Result<(), BoardError> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name == "." || name == ".." {
        Some("must not be a directory reference")
    } else if name.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if name.contains(['\0', '\n', '\r']) {
        Some("must not contain NUL or line breaks")
    } else if name.trim() != name {
        Some("must not start or end with whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(BoardError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
