use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::BoardError;
use crate::special::ReservedNames;

/// Environment variable overriding the configured repository root.
pub const ROOT_ENV: &str = "WB_ROOT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupConfig {
    pub bucket: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

/// Contents of `wb/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub reserved: ReservedNames,
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    pub backup: BackupConfig,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WbConfig {
    pub root: PathBuf,
    pub reserved: ReservedNames,
    pub editor: String,
    pub backup: BackupConfig,
}

/// Default location: `<config_dir>/wb/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wb/config.toml"))
}

/// Load a config file; a missing file yields defaults.
///
/// # Errors
///
/// [`BoardError::Config`] when the file exists but cannot be read or parsed.
pub fn load_file_config(path: &Path) -> Result<FileConfig, BoardError> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| BoardError::Config {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    toml::from_str::<FileConfig>(&content).map_err(|e| BoardError::Config {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Resolve settings from the CLI flag, environment and config file.
///
/// Root precedence: `cli_root` > `WB_ROOT` > `root` in the config file.
/// Editor precedence: config file > `VISUAL` > `EDITOR` > `vim`.
///
/// # Errors
///
/// [`BoardError::Config`] for an unreadable file, [`BoardError::NotConfigured`]
/// when no source names a root.
pub fn resolve_config(
    cli_root: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<WbConfig, BoardError> {
    let file = match config_path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_file_config(&path)?,
        None => FileConfig::default(),
    };

    resolve_from_parts(
        cli_root,
        env::var_os(ROOT_ENV).map(PathBuf::from),
        file,
        env::var("VISUAL").ok().or_else(|| env::var("EDITOR").ok()),
    )
}

fn resolve_from_parts(
    cli_root: Option<PathBuf>,
    env_root: Option<PathBuf>,
    file: FileConfig,
    env_editor: Option<String>,
) -> Result<WbConfig, BoardError> {
    let root = cli_root
        .or(env_root.filter(|p| !p.as_os_str().is_empty()))
        .or(file.root)
        .ok_or(BoardError::NotConfigured)?;

    let editor = file
        .editor
        .or(env_editor)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vim".to_string());

    Ok(WbConfig {
        root,
        reserved: file.reserved,
        editor,
        backup: file.backup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let tmp = TempDir::new().expect("tempdir");
        let cfg = load_file_config(&tmp.path().join("none.toml")).expect("load");
        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn parses_full_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "root = \"/home/me/wbs\"\neditor = \"nvim\"\n\n[reserved]\nlist_index = \"index\"\n\n[backup]\nbucket = \"wb-backup\"\nregion = \"us-east-1\"\n",
        )
        .expect("write");

        let cfg = load_file_config(&path).expect("load");
        assert_eq!(cfg.root, Some(PathBuf::from("/home/me/wbs")));
        assert_eq!(cfg.reserved.list_index, "index");
        assert_eq!(cfg.reserved.activity_log, "loglog");
        assert_eq!(cfg.backup.bucket.as_deref(), Some("wb-backup"));
        assert_eq!(cfg.editor.as_deref(), Some("nvim"));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "root = [unterminated").expect("write");
        assert!(matches!(
            load_file_config(&path).expect_err("bad toml"),
            BoardError::Config { .. }
        ));
    }

    #[test]
    fn root_precedence() {
        let file = FileConfig {
            root: Some("/file".into()),
            ..FileConfig::default()
        };
        let cfg = resolve_from_parts(Some("/cli".into()), Some("/env".into()), file.clone(), None)
            .expect("resolve");
        assert_eq!(cfg.root, PathBuf::from("/cli"));

        let cfg = resolve_from_parts(None, Some("/env".into()), file.clone(), None).expect("resolve");
        assert_eq!(cfg.root, PathBuf::from("/env"));

        let cfg = resolve_from_parts(None, None, file, None).expect("resolve");
        assert_eq!(cfg.root, PathBuf::from("/file"));

        assert!(matches!(
            resolve_from_parts(None, None, FileConfig::default(), None),
            Err(BoardError::NotConfigured)
        ));
    }

    #[test]
    fn editor_precedence() {
        let cfg = resolve_from_parts(Some("/r".into()), None, FileConfig::default(), None)
            .expect("resolve");
        assert_eq!(cfg.editor, "vim");

        let cfg = resolve_from_parts(Some("/r".into()), None, FileConfig::default(), Some("nano".into()))
            .expect("resolve");
        assert_eq!(cfg.editor, "nano");
    }
}
