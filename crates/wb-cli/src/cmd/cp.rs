//! `wb cp`: duplicate a board under a new name.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

/// Arguments for `wb cp`.
#[derive(Args, Debug)]
pub struct CpArgs {
    /// Existing board.
    pub src: String,

    /// Name for the copy; must not exist.
    pub dst: String,
}

#[derive(Debug, Serialize)]
struct Copied<'a> {
    src: &'a str,
    dst: &'a str,
}

impl Report for Copied<'_> {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "✓ copied '{}' to '{}'", self.src, self.dst)
    }
}

/// Execute `wb cp`.
pub fn run_cp(args: &CpArgs, repo: &Repo) -> anyhow::Result<()> {
    let logged = repo
        .manager
        .duplicate(&args.src, &args.dst)
        .or_render(repo.output)?;
    let copied = Copied {
        src: &args.src,
        dst: &args.dst,
    };
    emit(repo.output, &copied, logged.log_failure.as_ref())
}
