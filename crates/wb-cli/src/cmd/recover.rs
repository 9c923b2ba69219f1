//! `wb recover`: restore a board from the trash.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

/// Arguments for `wb recover`.
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// Trashed board to bring back.
    pub name: String,
}

#[derive(Debug, Serialize)]
struct Recovered<'a> {
    name: &'a str,
}

impl Report for Recovered<'_> {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "✓ recovered '{}'", self.name)
    }
}

/// Execute `wb recover`.
pub fn run_recover(args: &RecoverArgs, repo: &Repo) -> anyhow::Result<()> {
    let logged = repo.manager.recover(&args.name).or_render(repo.output)?;
    emit(
        repo.output,
        &Recovered { name: &args.name },
        logged.log_failure.as_ref(),
    )
}
