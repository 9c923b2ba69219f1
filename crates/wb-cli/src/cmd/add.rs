//! `wb add`: prepend one entry to a board without opening the editor.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

/// Arguments for `wb add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Board (or shortcut) to add to.
    pub name: String,

    /// Entry text; multiple words are joined with single spaces.
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub entry: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Added<'a> {
    name: &'a str,
    entry: &'a str,
}

impl Report for Added<'_> {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "✓ added to '{}'", self.name)
    }
}

/// Execute `wb add`.
pub fn run_add(args: &AddArgs, repo: &Repo) -> anyhow::Result<()> {
    let entry = args.entry.join(" ");
    let logged = repo
        .manager
        .fast_append(&args.name, &entry)
        .or_render(repo.output)?;
    let added = Added {
        name: &logged.value,
        entry: &entry,
    };
    emit(repo.output, &added, logged.log_failure.as_ref())
}
