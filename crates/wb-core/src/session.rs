//! Interactive edit sessions.
//!
//! A session moves through three states:
//!
//! - **Loaded**: the board name is resolved (directly, or through the
//!   shortcuts board) and its raw bytes captured.
//! - **Editing**: an external [`Editor`] owns the terminal; the call blocks
//!   until it exits.
//! - **Reconciled**: the bytes are re-read and compared. Byte inequality is
//!   the only criterion for "modified".
//!
//! An editor that exits non-zero, or is killed, is treated as a normal exit:
//! whatever is on disk afterwards is what gets compared.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::BoardError;
use crate::shortcuts::Shortcuts;
use crate::store::ContentStore;

/// How an editor process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorExit {
    Success,
    /// Non-zero exit code.
    Failed(i32),
    /// Terminated without an exit code (signal).
    Killed,
}

/// Something that lets a user edit a file and blocks until done.
pub trait Editor {
    /// Open `path` for editing and wait for the editor to finish.
    ///
    /// # Errors
    ///
    /// Only when the editor could not be started at all.
    fn open(&self, path: &Path) -> Result<EditorExit, BoardError>;
}

/// Runs an editor command with inherited stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
}

impl CommandEditor {
    /// Build from a shell-style command line such as `"code --wait"`.
    /// An empty command falls back to `vim`.
    #[must_use]
    pub fn from_command_line(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_else(|| "vim".to_string());
        Self {
            program,
            args: parts.collect(),
        }
    }

    /// vi-family editors are asked to start at the top-left corner.
    fn starts_at_top(&self) -> bool {
        let base = Path::new(&self.program)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.program);
        matches!(base, "vim" | "nvim" | "vi")
    }
}

impl Editor for CommandEditor {
    fn open(&self, path: &Path) -> Result<EditorExit, BoardError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if self.starts_at_top() {
            cmd.args(["-c", "+normal 1G1|"]);
        }
        cmd.arg(path);

        debug!(editor = %self.program, path = %path.display(), "launching editor");
        let status = cmd
            .status()
            .map_err(|e| BoardError::collaborator(format!("editor `{}`", self.program), e.to_string()))?;

        Ok(match status.code() {
            Some(0) => EditorExit::Success,
            Some(code) => EditorExit::Failed(code),
            None => EditorExit::Killed,
        })
    }
}

/// Result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Board actually edited; differs from the request when a shortcut was used.
    pub name: String,
    pub modified: bool,
    pub exit: EditorExit,
}

/// Session state: original content captured.
#[derive(Debug)]
pub struct Loaded {
    original: Vec<u8>,
}

/// Session state: new content captured and compared.
#[derive(Debug)]
pub struct Reconciled {
    modified: bool,
    exit: EditorExit,
}

/// An edit session in state `S`.
#[derive(Debug)]
pub struct EditSession<'a, S> {
    store: &'a ContentStore,
    name: String,
    path: PathBuf,
    state: S,
}

impl<'a> EditSession<'a, Loaded> {
    /// Resolve `requested` and capture its bytes.
    ///
    /// # Errors
    ///
    /// [`BoardError::ShortcutNotFound`] when `requested` is neither a board nor
    /// an alias; [`BoardError::NotFound`] when an alias points at a missing
    /// board.
    pub fn load(
        store: &'a ContentStore,
        shortcuts: Shortcuts<'_>,
        requested: &str,
    ) -> Result<Self, BoardError> {
        let name = if store.exists(requested) {
            requested.to_string()
        } else {
            let real = shortcuts.resolve_alias(requested)?;
            debug!(alias = requested, board = %real, "resolved shortcut");
            real
        };

        let original = store.read_raw(&name)?;
        let path = store.path_of(&name)?;
        Ok(Self {
            store,
            name,
            path,
            state: Loaded { original },
        })
    }

    /// Hand the file to `editor`, block, then reconcile.
    ///
    /// # Errors
    ///
    /// Editor spawn failure, or the board vanishing during the edit.
    pub fn edit(self, editor: &dyn Editor) -> Result<EditSession<'a, Reconciled>, BoardError> {
        let exit = editor.open(&self.path)?;
        if exit != EditorExit::Success {
            warn!(board = %self.name, ?exit, "editor did not exit cleanly; reconciling anyway");
        }

        let current = self.store.read_raw(&self.name)?;
        let modified = current != self.state.original;
        debug!(board = %self.name, modified, "edit session reconciled");
        Ok(EditSession {
            store: self.store,
            name: self.name,
            path: self.path,
            state: Reconciled { modified, exit },
        })
    }
}

impl<S> EditSession<'_, S> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EditSession<'_, Reconciled> {
    #[must_use]
    pub fn outcome(self) -> EditOutcome {
        EditOutcome {
            name: self.name,
            modified: self.state.modified,
            exit: self.state.exit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PathResolver;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Test editor that applies a closure to the file and records the path.
    struct ScriptedEditor<F: Fn(&Path)> {
        script: F,
        exit: EditorExit,
        opened: RefCell<Vec<PathBuf>>,
    }

    impl<F: Fn(&Path)> ScriptedEditor<F> {
        fn new(script: F) -> Self {
            Self {
                script,
                exit: EditorExit::Success,
                opened: RefCell::new(Vec::new()),
            }
        }
    }

    impl<F: Fn(&Path)> Editor for ScriptedEditor<F> {
        fn open(&self, path: &Path) -> Result<EditorExit, BoardError> {
            self.opened.borrow_mut().push(path.to_path_buf());
            (self.script)(path);
            Ok(self.exit)
        }
    }

    fn setup() -> (TempDir, ContentStore) {
        let tmp = TempDir::new().expect("tempdir");
        let store = ContentStore::new(PathResolver::new(tmp.path()));
        store.ensure_layout().expect("layout");
        (tmp, store)
    }

    fn run(store: &ContentStore, name: &str, editor: &dyn Editor) -> Result<EditOutcome, BoardError> {
        let shortcuts = Shortcuts::new(store, "shortcuts");
        Ok(EditSession::load(store, shortcuts, name)?.edit(editor)?.outcome())
    }

    #[test]
    fn identical_rewrite_is_not_modified() {
        let (_tmp, store) = setup();
        store.write_raw(b"same\n", "b").expect("write");
        let editor = ScriptedEditor::new(|p| fs::write(p, b"same\n").expect("rewrite"));
        let outcome = run(&store, "b", &editor).expect("session");
        assert!(!outcome.modified);
        assert_eq!(outcome.name, "b");
    }

    #[test]
    fn single_character_is_modified() {
        let (_tmp, store) = setup();
        store.write_raw(b"same\n", "b").expect("write");
        let editor = ScriptedEditor::new(|p| fs::write(p, b"same\n!").expect("rewrite"));
        assert!(run(&store, "b", &editor).expect("session").modified);
    }

    #[test]
    fn trailing_whitespace_counts() {
        let (_tmp, store) = setup();
        store.write_raw(b"x\n", "b").expect("write");
        let editor = ScriptedEditor::new(|p| fs::write(p, b"x \n").expect("rewrite"));
        assert!(run(&store, "b", &editor).expect("session").modified);
    }

    #[test]
    fn shortcut_substitutes_real_name() {
        let (tmp, store) = setup();
        store.write_lines(&["todo -> groceries"], "shortcuts").expect("write");
        store.write_lines(&["milk"], "groceries").expect("write");
        let editor = ScriptedEditor::new(|_| {});

        let outcome = run(&store, "todo", &editor).expect("session");
        assert_eq!(outcome.name, "groceries");
        assert_eq!(
            editor.opened.borrow().as_slice(),
            [tmp.path().join("boards/groceries")]
        );
    }

    #[test]
    fn unknown_name_fails_before_editing() {
        let (_tmp, store) = setup();
        let editor = ScriptedEditor::new(|_| panic!("editor must not open"));
        let err = run(&store, "nope", &editor).expect_err("unknown");
        assert!(matches!(err, BoardError::ShortcutNotFound { .. }));
    }

    #[test]
    fn killed_editor_still_reconciles() {
        let (_tmp, store) = setup();
        store.write_raw(b"a", "b").expect("write");
        let mut editor = ScriptedEditor::new(|p| fs::write(p, b"ab").expect("rewrite"));
        editor.exit = EditorExit::Killed;
        let outcome = run(&store, "b", &editor).expect("session");
        assert!(outcome.modified);
        assert_eq!(outcome.exit, EditorExit::Killed);
    }

    #[test]
    fn command_line_parsing() {
        let editor = CommandEditor::from_command_line("code --wait");
        assert_eq!(editor.program, "code");
        assert_eq!(editor.args, vec!["--wait"]);
        assert!(!editor.starts_at_top());
        assert!(CommandEditor::from_command_line("").starts_at_top());
        assert!(CommandEditor::from_command_line("/usr/bin/nvim").starts_at_top());
    }
}
