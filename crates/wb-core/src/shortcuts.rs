//! Alias resolution through the shortcuts board.
//!
//! Each line reads `<alias> -> <realName>`. Fields are whitespace separated
//! and anything past the third field is ignored. Lines with fewer than three
//! fields, or whose second field is not the arrow, are skipped and scanning
//! continues; a malformed line never fails a lookup. The first matching
//! alias wins, so later duplicates are masked.

use tracing::trace;

use crate::error::BoardError;
use crate::store::ContentStore;

/// Separator between alias and target.
pub const ARROW: &str = "->";

/// Parse one shortcut line into `(alias, target)`.
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split_whitespace();
    let alias = fields.next()?;
    let arrow = fields.next()?;
    let target = fields.next()?;
    (arrow == ARROW).then_some((alias, target))
}

/// First-match lookup over already-loaded lines.
#[must_use]
pub fn lookup<'l, S: AsRef<str>>(lines: &'l [S], alias: &str) -> Option<&'l str> {
    lines.iter().find_map(|line| match parse_line(line.as_ref()) {
        Some((found, target)) if found == alias => Some(target),
        Some(_) => None,
        None => {
            trace!(line = line.as_ref(), "skipping non-shortcut line");
            None
        }
    })
}

/// Shortcut table bound to a store and the shortcuts board's name.
#[derive(Debug, Clone, Copy)]
pub struct Shortcuts<'a> {
    store: &'a ContentStore,
    board: &'a str,
}

impl<'a> Shortcuts<'a> {
    #[must_use]
    pub const fn new(store: &'a ContentStore, board: &'a str) -> Self {
        Self { store, board }
    }

    /// Map `alias` to the board it points at.
    ///
    /// # Errors
    ///
    /// [`BoardError::ShortcutNotFound`] when the shortcuts board is missing or
    /// has no matching line; [`BoardError::Io`] on read failure.
    pub fn resolve_alias(&self, alias: &str) -> Result<String, BoardError> {
        let lines = match self.store.read_lines(self.board) {
            Ok(lines) => lines,
            Err(BoardError::NotFound { .. }) => {
                return Err(BoardError::ShortcutNotFound {
                    name: alias.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        lookup(&lines, alias)
            .map(str::to_string)
            .ok_or_else(|| BoardError::ShortcutNotFound {
                name: alias.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PathResolver;
    use tempfile::TempDir;

    #[test]
    fn parses_well_formed_lines() {
        assert_eq!(parse_line("todo -> groceries"), Some(("todo", "groceries")));
        assert_eq!(parse_line("  t\t->   g  trailing words"), Some(("t", "g")));
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let lines = [
            "",
            "just words",
            "todo => wrong-arrow",
            "todo ->",
            "# todo -> commented",
            "todo -> groceries",
        ];
        assert_eq!(parse_line("todo => wrong-arrow"), None);
        assert_eq!(parse_line("todo ->"), None);
        assert_eq!(lookup(&lines, "todo"), Some("groceries"));
    }

    #[test]
    fn first_match_wins() {
        let lines = ["a -> first", "a -> second"];
        assert_eq!(lookup(&lines, "a"), Some("first"));
    }

    #[test]
    fn missing_board_or_alias_is_shortcut_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        let store = ContentStore::new(PathResolver::new(tmp.path()));
        store.ensure_layout().expect("layout");
        let shortcuts = Shortcuts::new(&store, "shortcuts");

        let err = shortcuts.resolve_alias("todo").expect_err("no board");
        assert!(matches!(err, BoardError::ShortcutNotFound { .. }));

        store.write_lines(&["x -> y"], "shortcuts").expect("write");
        let err = shortcuts.resolve_alias("todo").expect_err("no alias");
        assert!(matches!(err, BoardError::ShortcutNotFound { .. }));
        assert_eq!(shortcuts.resolve_alias("x").expect("alias"), "y");
    }
}
