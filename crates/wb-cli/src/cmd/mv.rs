//! `wb mv`: rename a board and its list index entry.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

/// Arguments for `wb mv`.
#[derive(Args, Debug)]
pub struct MvArgs {
    /// Current board name.
    pub old: String,

    /// New name; must not exist.
    pub new: String,
}

#[derive(Debug, Serialize)]
struct Renamed<'a> {
    old: &'a str,
    new: &'a str,
}

impl Report for Renamed<'_> {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "✓ renamed '{}' to '{}'", self.old, self.new)
    }
}

/// Execute `wb mv`.
pub fn run_mv(args: &MvArgs, repo: &Repo) -> anyhow::Result<()> {
    let logged = repo
        .manager
        .rename(&args.old, &args.new)
        .or_render(repo.output)?;
    let renamed = Renamed {
        old: &args.old,
        new: &args.new,
    };
    emit(repo.output, &renamed, logged.log_failure.as_ref())
}
