use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotConfigured,
    ConfigParseError,
    BoardNotFound,
    TrashEntryNotFound,
    ShortcutNotFound,
    BoardExists,
    TrashConflict,
    LiveConflict,
    ReservedName,
    InvalidName,
    FileIoFailed,
    CollaboratorFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotConfigured => "E1001",
            Self::ConfigParseError => "E1002",
            Self::BoardNotFound => "E2001",
            Self::TrashEntryNotFound => "E2002",
            Self::ShortcutNotFound => "E2003",
            Self::BoardExists => "E3001",
            Self::TrashConflict => "E3002",
            Self::LiveConflict => "E3003",
            Self::ReservedName => "E3004",
            Self::InvalidName => "E4001",
            Self::FileIoFailed => "E5001",
            Self::CollaboratorFailed => "E6001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotConfigured => "Repository root not configured",
            Self::ConfigParseError => "Config file parse error",
            Self::BoardNotFound => "Board not found",
            Self::TrashEntryNotFound => "Board not found in trash",
            Self::ShortcutNotFound => "No such board and no such shortcut",
            Self::BoardExists => "Board already exists",
            Self::TrashConflict => "Board of that name already in trash",
            Self::LiveConflict => "Live board of that name already exists",
            Self::ReservedName => "Reserved board name",
            Self::InvalidName => "Invalid board name",
            Self::FileIoFailed => "Board file I/O failed",
            Self::CollaboratorFailed => "External command failed",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotConfigured => Some(
                "Set WB_ROOT, pass --root, or add `root = \"...\"` to the wb config.toml.",
            ),
            Self::ConfigParseError => Some("Fix syntax in wb/config.toml and retry."),
            Self::BoardNotFound | Self::ShortcutNotFound => {
                Some("Create the board first with `wb new <name>`.")
            }
            Self::TrashEntryNotFound => None,
            Self::BoardExists | Self::LiveConflict => {
                Some("Pick another name; existing boards are never overwritten.")
            }
            Self::TrashConflict => {
                Some("Run `wb empty-trash` or `wb recover <name>` to clear the trash slot.")
            }
            Self::ReservedName => Some("Reserved names are managed by wb itself."),
            Self::InvalidName => Some("Use a plain file name without slashes or newlines."),
            Self::FileIoFailed => Some("Check disk space and permissions under the repository root."),
            Self::CollaboratorFailed => Some("Run the command by hand to see its full output."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the board repository manager.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("board '{name}' does not exist")]
    NotFound { name: String },

    #[error("board '{name}' is not in the trash")]
    NotInTrash { name: String },

    #[error("no board or shortcut named '{name}'")]
    ShortcutNotFound { name: String },

    #[error("board '{name}' already exists; refusing to overwrite")]
    AlreadyExists { name: String },

    #[error("a board named '{name}' is already in the trash")]
    TrashConflict { name: String },

    #[error("a live board named '{name}' already exists")]
    LiveConflict { name: String },

    #[error("'{name}' is a reserved board name")]
    ReservedName { name: String },

    #[error("invalid board name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{what} failed: {detail}")]
    Collaborator { what: String, detail: String },

    #[error("no repository root configured")]
    NotConfigured,

    #[error("failed to load config {}: {detail}", path.display())]
    Config { path: PathBuf, detail: String },
}

impl BoardError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn collaborator(what: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Collaborator {
            what: what.into(),
            detail: detail.into(),
        }
    }

    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::BoardNotFound,
            Self::NotInTrash { .. } => ErrorCode::TrashEntryNotFound,
            Self::ShortcutNotFound { .. } => ErrorCode::ShortcutNotFound,
            Self::AlreadyExists { .. } => ErrorCode::BoardExists,
            Self::TrashConflict { .. } => ErrorCode::TrashConflict,
            Self::LiveConflict { .. } => ErrorCode::LiveConflict,
            Self::ReservedName { .. } => ErrorCode::ReservedName,
            Self::InvalidName { .. } => ErrorCode::InvalidName,
            Self::Io { .. } => ErrorCode::FileIoFailed,
            Self::Collaborator { .. } => ErrorCode::CollaboratorFailed,
            Self::NotConfigured => ErrorCode::NotConfigured,
            Self::Config { .. } => ErrorCode::ConfigParseError,
        }
    }

    /// Optional remediation hint for the user.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }

    /// True for the "absent" family: board, trash entry, or shortcut.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotInTrash { .. } | Self::ShortcutNotFound { .. }
        )
    }

    /// True for the "would overwrite" family.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyExists { .. } | Self::TrashConflict { .. } | Self::LiveConflict { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardError, ErrorCode};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::NotConfigured,
            ErrorCode::ConfigParseError,
            ErrorCode::BoardNotFound,
            ErrorCode::TrashEntryNotFound,
            ErrorCode::ShortcutNotFound,
            ErrorCode::BoardExists,
            ErrorCode::TrashConflict,
            ErrorCode::LiveConflict,
            ErrorCode::ReservedName,
            ErrorCode::InvalidName,
            ErrorCode::FileIoFailed,
            ErrorCode::CollaboratorFailed,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::TrashConflict.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn families_classify_variants() {
        let missing = BoardError::ShortcutNotFound { name: "x".into() };
        assert!(missing.is_not_found());
        assert!(!missing.is_conflict());

        let clash = BoardError::LiveConflict { name: "x".into() };
        assert!(clash.is_conflict());
        assert_eq!(clash.code(), ErrorCode::LiveConflict);
    }
}
