//! One handler per subcommand, plus the shared repository context.

pub mod add;
pub mod backup;
pub mod cat;
pub mod completions;
pub mod cp;
pub mod edit;
pub mod empty_trash;
pub mod log;
pub mod ls;
pub mod mv;
pub mod new;
pub mod push;
pub mod recover;
pub mod rm;
pub mod stats;

use std::path::{Path, PathBuf};

use wb_core::config::{WbConfig, resolve_config};
use wb_core::session::CommandEditor;
use wb_core::{BoardError, BoardManager};

use crate::output::{Format, Problem, report_problem};

/// Resolved configuration and an opened manager for one invocation.
pub struct Repo {
    pub config: WbConfig,
    pub manager: BoardManager,
    pub output: Format,
}

impl Repo {
    /// Resolve the root and open (creating if needed) the repository.
    ///
    /// # Errors
    ///
    /// Configuration and layout errors, already rendered to stderr.
    pub fn open(
        root: Option<PathBuf>,
        config_path: Option<&Path>,
        output: Format,
    ) -> anyhow::Result<Self> {
        let config = resolve_config(root, config_path).or_render(output)?;
        let manager = BoardManager::from_config(&config).or_render(output)?;
        tracing::debug!(root = %config.root.display(), "opened repository");
        Ok(Self {
            config,
            manager,
            output,
        })
    }

    /// The editor command configured for interactive sessions.
    pub fn editor(&self) -> CommandEditor {
        CommandEditor::from_command_line(&self.config.editor)
    }

    /// `requested`, or the default board name when absent.
    pub fn board_or_default<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.config.reserved.default_board)
    }
}

/// An error that has already been rendered to stderr.
#[derive(Debug)]
pub struct Reported(pub String);

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Reported {}

/// Print `problem` and return it as [`Reported`].
pub fn fail(output: Format, problem: &Problem) -> anyhow::Error {
    if let Err(write_err) = report_problem(output, problem) {
        return write_err;
    }
    anyhow::Error::new(Reported(problem.message.clone()))
}

/// Print a core error before propagating it.
pub trait OrRender<T> {
    /// # Errors
    ///
    /// The original error, printed and wrapped as [`Reported`].
    fn or_render(self, output: Format) -> anyhow::Result<T>;
}

impl<T> OrRender<T> for Result<T, BoardError> {
    fn or_render(self, output: Format) -> anyhow::Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(fail(output, &Problem::from(&err))),
        }
    }
}
