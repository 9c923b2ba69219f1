//! `wb new`: create a board and open it for editing.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

/// Arguments for `wb new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Name of the board to create.
    pub name: String,

    /// Create the empty board without opening the editor.
    #[arg(long)]
    pub no_edit: bool,
}

#[derive(Debug, Serialize)]
struct Created<'a> {
    name: &'a str,
    modified: bool,
}

impl Report for Created<'_> {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "✓ created board '{}'", self.name)
    }
}

/// Execute `wb new`.
pub fn run_new(args: &NewArgs, repo: &Repo) -> anyhow::Result<()> {
    let mgr = &repo.manager;
    let (modified, log_failure) = if args.no_edit {
        (false, mgr.create(&args.name).or_render(repo.output)?.log_failure)
    } else {
        let logged = mgr
            .create_and_edit(&args.name, &repo.editor())
            .or_render(repo.output)?;
        (logged.value.modified, logged.log_failure)
    };
    let created = Created {
        name: &args.name,
        modified,
    };
    emit(repo.output, &created, log_failure.as_ref())
}
