//! `wb rm`: move a board to the trash.
//!
//! The board leaves the list index: its `TODO add` marker is dropped, or
//! its bracketed token blanked out when it was already filed somewhere.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use wb_core::list_index::RemoveOutcome;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

/// Arguments for `wb rm`.
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Board to delete.
    pub name: String,
}

#[derive(Debug, Serialize)]
struct Removed<'a> {
    name: &'a str,
    index: &'static str,
}

impl Report for Removed<'_> {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "✓ moved '{}' to trash", self.name)
    }
}

const fn index_change(outcome: RemoveOutcome) -> &'static str {
    match outcome {
        RemoveOutcome::MarkerRemoved => "marker_removed",
        RemoveOutcome::TokenBlanked => "token_blanked",
        RemoveOutcome::NotPresent => "not_present",
    }
}

/// Execute `wb rm`.
pub fn run_rm(args: &RmArgs, repo: &Repo) -> anyhow::Result<()> {
    let logged = repo.manager.remove(&args.name).or_render(repo.output)?;
    let removed = Removed {
        name: &args.name,
        index: index_change(logged.value),
    };
    emit(repo.output, &removed, logged.log_failure.as_ref())
}
