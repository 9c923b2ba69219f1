//! The list index board (`lsls` by default).
//!
//! Lines are either markers, `TODO add: [<name>]`, left for the user to file
//! somewhere, or free-form annotated lines that mention a board as a
//! bracketed `[<name>]` token. Edits touch at most one line and never reorder
//! the rest of the file.

use tracing::debug;

use crate::error::BoardError;
use crate::store::ContentStore;

/// What a [`ListIndex::remove_entry`] call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// A whole `TODO add: [name]` line was deleted.
    MarkerRemoved,
    /// No marker line; the first `[name]` token was replaced with spaces.
    TokenBlanked,
    /// Neither form was present (or the index does not exist).
    NotPresent,
}

/// Marker line announcing a freshly created board.
#[must_use]
pub fn marker_line(name: &str) -> String {
    format!("TODO add: [{name}]")
}

fn token(name: &str) -> String {
    format!("[{name}]")
}

/// Remove `name` from index text. Marker lines take precedence; otherwise the
/// first bracketed token is blanked to equal-width whitespace.
#[must_use]
pub fn remove_from_text(text: &str, name: &str) -> (String, RemoveOutcome) {
    let marker = marker_line(name);
    let mut offset = 0;
    for segment in text.split_inclusive('\n') {
        let line = segment.strip_suffix('\n').unwrap_or(segment);
        if line.strip_suffix('\r').unwrap_or(line) == marker {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..offset]);
            out.push_str(&text[offset + segment.len()..]);
            return (out, RemoveOutcome::MarkerRemoved);
        }
        offset += segment.len();
    }

    let token = token(name);
    if text.contains(&token) {
        let blank = " ".repeat(token.chars().count());
        return (text.replacen(&token, &blank, 1), RemoveOutcome::TokenBlanked);
    }

    (text.to_string(), RemoveOutcome::NotPresent)
}

/// Rewrite the first `[old]` token to `[new]`. `None` when no token matches.
#[must_use]
pub fn rename_in_text(text: &str, old: &str, new: &str) -> Option<String> {
    let from = token(old);
    text.contains(&from)
        .then(|| text.replacen(&from, &token(new), 1))
}

/// List index operations bound to a store and the index board's name.
#[derive(Debug, Clone, Copy)]
pub struct ListIndex<'a> {
    store: &'a ContentStore,
    board: &'a str,
}

impl<'a> ListIndex<'a> {
    #[must_use]
    pub const fn new(store: &'a ContentStore, board: &'a str) -> Self {
        Self { store, board }
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.store.exists(self.board)
    }

    /// Prepend a marker line for `name`, creating the index if needed.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on read/write failure.
    pub fn add_entry(&self, name: &str) -> Result<(), BoardError> {
        if !self.exists() {
            debug!(index = self.board, "creating list index");
            self.store.write_lines::<&str>(&[], self.board)?;
        }
        self.store.prepend(self.board, &marker_line(name))
    }

    /// Drop `name` from the index; see [`remove_from_text`].
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on read/write failure.
    pub fn remove_entry(&self, name: &str) -> Result<RemoveOutcome, BoardError> {
        if !self.exists() {
            return Ok(RemoveOutcome::NotPresent);
        }
        let text = self.store.read_text(self.board)?;
        let (updated, outcome) = remove_from_text(&text, name);
        if outcome != RemoveOutcome::NotPresent {
            self.store.write_raw(updated.as_bytes(), self.board)?;
        }
        debug!(index = self.board, name, ?outcome, "removed index entry");
        Ok(outcome)
    }

    /// Rewrite the first `[old]` token to `[new]`. Returns whether anything
    /// changed; a missing index changes nothing.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on read/write failure.
    pub fn rename_entry(&self, old: &str, new: &str) -> Result<bool, BoardError> {
        if !self.exists() {
            return Ok(false);
        }
        let text = self.store.read_text(self.board)?;
        match rename_in_text(&text, old, new) {
            Some(updated) => {
                self.store.write_raw(updated.as_bytes(), self.board)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PathResolver;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ContentStore) {
        let tmp = TempDir::new().expect("tempdir");
        let store = ContentStore::new(PathResolver::new(tmp.path()));
        store.ensure_layout().expect("layout");
        (tmp, store)
    }

    #[test]
    fn marker_precedes_token() {
        let text = "work  [todo] daily\nTODO add: [todo]\nother\n";
        let (out, outcome) = remove_from_text(text, "todo");
        assert_eq!(outcome, RemoveOutcome::MarkerRemoved);
        assert_eq!(out, "work  [todo] daily\nother\n");
    }

    #[test]
    fn token_is_blanked_to_equal_width() {
        let text = "a [abc] b\n";
        let (out, outcome) = remove_from_text(text, "abc");
        assert_eq!(outcome, RemoveOutcome::TokenBlanked);
        assert_eq!(out, "a       b\n");
        assert_eq!(out.len(), text.len());
    }

    #[test]
    fn marker_must_match_whole_line() {
        let text = "xTODO add: [n]\n";
        let (out, outcome) = remove_from_text(text, "n");
        assert_eq!(outcome, RemoveOutcome::TokenBlanked);
        assert_eq!(out, "xTODO add:    \n");
    }

    #[test]
    fn marker_on_last_line_without_newline() {
        let (out, outcome) = remove_from_text("keep\nTODO add: [z]", "z");
        assert_eq!(outcome, RemoveOutcome::MarkerRemoved);
        assert_eq!(out, "keep\n");
    }

    #[test]
    fn crlf_marker_line_is_removed_whole() {
        let text = "keep\r\nTODO add: [x]\r\nlast\r\n";
        let (out, outcome) = remove_from_text(text, "x");
        assert_eq!(outcome, RemoveOutcome::MarkerRemoved);
        assert_eq!(out, "keep\r\nlast\r\n");
    }

    #[test]
    fn similar_names_are_untouched() {
        let text = "TODO add: [ab]\n[abc]\n";
        let (out, outcome) = remove_from_text(text, "a");
        assert_eq!(outcome, RemoveOutcome::NotPresent);
        assert_eq!(out, text);
    }

    #[test]
    fn rename_rewrites_first_token_only() {
        let text = "see [wb] and again [wb]\n";
        assert_eq!(
            rename_in_text(text, "wb", "board1").as_deref(),
            Some("see [board1] and again [wb]\n")
        );
        assert!(rename_in_text(text, "nope", "x").is_none());
    }

    #[test]
    fn add_entry_creates_index() {
        let (_tmp, store) = setup();
        let index = ListIndex::new(&store, "lsls");
        assert!(!index.exists());
        index.add_entry("first").expect("add");
        index.add_entry("second").expect("add");
        assert_eq!(
            store.read_lines("lsls").expect("read"),
            vec!["TODO add: [second]", "TODO add: [first]"]
        );
    }

    #[test]
    fn remove_twice_is_harmless() {
        let (_tmp, store) = setup();
        store
            .write_lines(&["TODO add: [gone]", "keep [other] here"], "lsls")
            .expect("write");
        let index = ListIndex::new(&store, "lsls");

        assert_eq!(index.remove_entry("gone").expect("first"), RemoveOutcome::MarkerRemoved);
        assert_eq!(index.remove_entry("gone").expect("second"), RemoveOutcome::NotPresent);
        assert_eq!(store.read_lines("lsls").expect("read"), vec!["keep [other] here"]);
    }

    #[test]
    fn missing_index_is_not_an_error() {
        let (_tmp, store) = setup();
        let index = ListIndex::new(&store, "lsls");
        assert_eq!(index.remove_entry("x").expect("remove"), RemoveOutcome::NotPresent);
        assert!(!index.rename_entry("x", "y").expect("rename"));
        assert!(!store.exists("lsls"));
    }
}
