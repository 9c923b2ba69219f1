//! Reserved boards and the names they live under.
//!
//! The list index, activity log, and shortcut table are ordinary boards as
//! far as [`crate::store::ContentStore`] is concerned. What makes them special
//! is a [`SpecialBoard`] role looked up in an injected [`ReservedNames`]
//! table, never a hard-coded string at the call site.

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Roles a reserved board can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialBoard {
    /// Opened when no name is given; auto-created on first view.
    Default,
    /// Derived listing of live boards.
    ListIndex,
    /// Newest-first record of mutating actions.
    ActivityLog,
    /// `alias -> realName` table.
    Shortcuts,
}

impl SpecialBoard {
    pub const ALL: [Self; 4] = [
        Self::Default,
        Self::ListIndex,
        Self::ActivityLog,
        Self::Shortcuts,
    ];

    /// System boards are maintained by wb. Users may view and edit them but
    /// never create, copy onto, rename, delete or append to them.
    #[must_use]
    pub const fn is_system(self) -> bool {
        matches!(self, Self::ListIndex | Self::ActivityLog)
    }
}

/// Names bound to each [`SpecialBoard`] role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservedNames {
    pub default_board: String,
    pub list_index: String,
    pub activity_log: String,
    pub shortcuts: String,
}

impl Default for ReservedNames {
    fn default() -> Self {
        Self {
            default_board: "wb".to_string(),
            list_index: "lsls".to_string(),
            activity_log: "loglog".to_string(),
            shortcuts: "shortcuts".to_string(),
        }
    }
}

impl ReservedNames {
    #[must_use]
    pub fn name_of(&self, board: SpecialBoard) -> &str {
        match board {
            SpecialBoard::Default => &self.default_board,
            SpecialBoard::ListIndex => &self.list_index,
            SpecialBoard::ActivityLog => &self.activity_log,
            SpecialBoard::Shortcuts => &self.shortcuts,
        }
    }

    /// The role `name` plays, if any.
    #[must_use]
    pub fn classify(&self, name: &str) -> Option<SpecialBoard> {
        SpecialBoard::ALL
            .into_iter()
            .find(|board| self.name_of(*board) == name)
    }

    /// Reject system boards as the subject of create, rename, delete or append.
    ///
    /// # Errors
    ///
    /// [`BoardError::ReservedName`] for the list index and activity log.
    pub fn ensure_user_writable(&self, name: &str) -> Result<(), BoardError> {
        match self.classify(name) {
            Some(board) if board.is_system() => Err(BoardError::ReservedName {
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Reject any reserved name as the target of a copy or rename.
    ///
    /// # Errors
    ///
    /// [`BoardError::ReservedName`] for every reserved name.
    pub fn ensure_unreserved(&self, name: &str) -> Result<(), BoardError> {
        if self.classify(name).is_some() {
            return Err(BoardError::ReservedName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Boards hidden from the stats report: the list index, the activity
    /// log, and anything with a dot in its name.
    #[must_use]
    pub fn hidden_from_stats(&self, name: &str) -> bool {
        name.contains('.') || name == self.list_index || name == self.activity_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_default_names() {
        let names = ReservedNames::default();
        assert_eq!(names.classify("wb"), Some(SpecialBoard::Default));
        assert_eq!(names.classify("lsls"), Some(SpecialBoard::ListIndex));
        assert_eq!(names.classify("loglog"), Some(SpecialBoard::ActivityLog));
        assert_eq!(names.classify("shortcuts"), Some(SpecialBoard::Shortcuts));
        assert_eq!(names.classify("groceries"), None);
    }

    #[test]
    fn custom_table_replaces_defaults() {
        let names = ReservedNames {
            list_index: "index".into(),
            ..ReservedNames::default()
        };
        assert_eq!(names.classify("index"), Some(SpecialBoard::ListIndex));
        assert_eq!(names.classify("lsls"), None);
    }

    #[test]
    fn only_system_boards_are_write_protected() {
        let names = ReservedNames::default();
        assert!(names.ensure_user_writable("lsls").is_err());
        assert!(names.ensure_user_writable("loglog").is_err());
        assert!(names.ensure_user_writable("wb").is_ok());
        assert!(names.ensure_user_writable("shortcuts").is_ok());
        assert!(names.ensure_unreserved("shortcuts").is_err());
        assert!(names.ensure_unreserved("plain").is_ok());
    }

    #[test]
    fn stats_hiding_rule() {
        let names = ReservedNames::default();
        assert!(names.hidden_from_stats("lsls"));
        assert!(names.hidden_from_stats("loglog"));
        assert!(names.hidden_from_stats("notes.md"));
        assert!(!names.hidden_from_stats("shortcuts"));
        assert!(!names.hidden_from_stats("wb"));
    }
}
