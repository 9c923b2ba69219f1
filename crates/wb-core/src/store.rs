//! Single-file read/write primitives for live boards.
//!
//! Every operation touches exactly one board file (two for copy/move). Lines
//! are encoded as `line + "\n"` each; decoding treats one trailing `\n` as a
//! terminator and splits on `\n` only, so `write_lines` followed by
//! `read_lines` returns the input exactly, carriage returns and empty lines
//! included.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BoardError;
use crate::paths::{Area, PathResolver};

/// Content operations on boards under `<root>/boards`.
#[derive(Debug, Clone)]
pub struct ContentStore {
    paths: PathResolver,
}

impl ContentStore {
    #[must_use]
    pub const fn new(paths: PathResolver) -> Self {
        Self { paths }
    }

    #[must_use]
    pub const fn paths(&self) -> &PathResolver {
        &self.paths
    }

    /// Create `boards/` and `trash/` if missing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Io`] if a directory cannot be created.
    pub fn ensure_layout(&self) -> Result<(), BoardError> {
        for area in [Area::Boards, Area::Trash] {
            let dir = self.paths.area_dir(area);
            fs::create_dir_all(&dir).map_err(|e| BoardError::io(&dir, e))?;
        }
        Ok(())
    }

    /// Path of a live board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidName`] for unusable names.
    pub fn path_of(&self, name: &str) -> Result<PathBuf, BoardError> {
        self.paths.board(name)
    }

    /// Whether a live board named `name` exists. Invalid names never exist.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.paths.board(name).is_ok_and(|p| p.is_file())
    }

    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the board is absent, [`BoardError::Io`] on
    /// read failure.
    pub fn read_raw(&self, name: &str) -> Result<Vec<u8>, BoardError> {
        let path = self.paths.board(name)?;
        fs::read(&path).map_err(|e| not_found_or_io(name, &path, e))
    }

    /// # Errors
    ///
    /// As [`ContentStore::read_raw`]; non-UTF-8 content is an I/O error.
    pub fn read_text(&self, name: &str) -> Result<String, BoardError> {
        let path = self.paths.board(name)?;
        fs::read_to_string(&path).map_err(|e| not_found_or_io(name, &path, e))
    }

    /// # Errors
    ///
    /// As [`ContentStore::read_text`].
    pub fn read_lines(&self, name: &str) -> Result<Vec<String>, BoardError> {
        self.read_text(name).map(|text| decode_lines(&text))
    }

    /// Overwrite (or create) the board with `bytes`.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on write failure.
    pub fn write_raw(&self, bytes: &[u8], name: &str) -> Result<(), BoardError> {
        let path = self.paths.board(name)?;
        debug!(board = name, bytes = bytes.len(), "writing board");
        fs::write(&path, bytes).map_err(|e| BoardError::io(&path, e))
    }

    /// Overwrite (or create) the board with `lines`.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on write failure.
    pub fn write_lines<S: AsRef<str>>(&self, lines: &[S], name: &str) -> Result<(), BoardError> {
        self.write_raw(encode_lines(lines).as_bytes(), name)
    }

    /// Insert `entry` as the new first line.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the board does not exist yet.
    pub fn prepend(&self, name: &str, entry: &str) -> Result<(), BoardError> {
        let mut lines = self.read_lines(name)?;
        lines.insert(0, entry.to_string());
        self.write_lines(&lines, name)
    }

    /// Insert `entry` as the new last line.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if the board does not exist yet.
    pub fn append(&self, name: &str, entry: &str) -> Result<(), BoardError> {
        let mut lines = self.read_lines(name)?;
        lines.push(entry.to_string());
        self.write_lines(&lines, name)
    }

    /// Truncate the board to zero lines. A missing board is left missing.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] on write failure.
    pub fn clear(&self, name: &str) -> Result<(), BoardError> {
        if !self.exists(name) {
            debug!(board = name, "clear on missing board is a no-op");
            return Ok(());
        }
        self.write_raw(&[], name)
    }

    /// Duplicate `src` into a new board `dst`.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if `src` is absent, [`BoardError::AlreadyExists`]
    /// if `dst` is present.
    pub fn copy(&self, src: &str, dst: &str) -> Result<(), BoardError> {
        let src_path = self.paths.board(src)?;
        let dst_path = self.paths.board(dst)?;
        if !src_path.is_file() {
            return Err(BoardError::NotFound { name: src.to_string() });
        }

        let mut reader = fs::File::open(&src_path).map_err(|e| not_found_or_io(src, &src_path, e))?;
        let mut writer = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dst_path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => BoardError::AlreadyExists { name: dst.to_string() },
                _ => BoardError::io(&dst_path, e),
            })?;
        io::copy(&mut reader, &mut writer).map_err(|e| BoardError::io(&dst_path, e))?;
        debug!(src, dst, "copied board");
        Ok(())
    }

    /// Rename `src` to `dst` within `boards/`.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotFound`] if `src` is absent, [`BoardError::AlreadyExists`]
    /// if `dst` is present.
    pub fn rename(&self, src: &str, dst: &str) -> Result<(), BoardError> {
        let src_path = self.paths.board(src)?;
        let dst_path = self.paths.board(dst)?;
        if !src_path.is_file() {
            return Err(BoardError::NotFound { name: src.to_string() });
        }
        if dst_path.exists() {
            return Err(BoardError::AlreadyExists { name: dst.to_string() });
        }
        fs::rename(&src_path, &dst_path).map_err(|e| BoardError::io(&src_path, e))?;
        debug!(src, dst, "renamed board");
        Ok(())
    }

    /// Names of all live boards, ascending by byte order. Only regular files
    /// count; a missing `boards/` directory yields an empty listing.
    ///
    /// # Errors
    ///
    /// [`BoardError::Io`] if the directory cannot be read.
    pub fn board_names(&self) -> Result<Vec<String>, BoardError> {
        list_files(&self.paths.area_dir(Area::Boards))
    }
}

/// Regular-file names directly under `dir`, sorted.
pub(crate) fn list_files(dir: &Path) -> Result<Vec<String>, BoardError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(BoardError::io(dir, e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BoardError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| BoardError::io(&entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                debug!(dir = %dir.display(), name = ?raw, "skipping non-UTF-8 file name");
            }
        }
    }
    names.sort();
    Ok(names)
}

fn not_found_or_io(name: &str, path: &Path, err: io::Error) -> BoardError {
    if err.kind() == ErrorKind::NotFound {
        BoardError::NotFound { name: name.to_string() }
    } else {
        BoardError::io(path, err)
    }
}

/// Encode lines as board text: each line followed by `\n`.
#[must_use]
pub fn encode_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

/// Inverse of [`encode_lines`]; also accepts a missing final newline.
#[must_use]
pub fn decode_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n').map(str::to_string).collect()
}
