//! `wb push`: commit the repository, push it, and start a fresh activity log.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use wb_core::vcs::GitCli;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

/// Arguments for `wb push`.
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Commit message words (defaults to the current timestamp).
    #[arg(trailing_var_arg = true, num_args = 0..)]
    pub message: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Pushed<'a> {
    message: &'a str,
}

impl Report for Pushed<'_> {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "✓ pushed: {}", self.message)
    }
}

/// Execute `wb push`.
pub fn run_push(args: &PushArgs, repo: &Repo) -> anyhow::Result<()> {
    let message = args.message.join(" ");
    let logged = repo
        .manager
        .push(Some(message.as_str()), &GitCli)
        .or_render(repo.output)?;
    let pushed = Pushed {
        message: &logged.value,
    };
    emit(repo.output, &pushed, logged.log_failure.as_ref())
}
