//! `wb stats`: per-board churn from git history, least active first.

use std::io::{self, Write};

use serde::Serialize;
use wb_core::stats::BoardStat;
use wb_core::vcs::GitCli;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

#[derive(Debug, Serialize)]
struct Churn<'a> {
    boards: Vec<&'a BoardStat>,
}

impl Report for Churn<'_> {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        self.boards.iter().try_for_each(|row| {
            writeln!(w, "{:>8} {:>8}  {}", row.additions, row.deletions, row.name)
        })
    }
}

/// Execute `wb stats`.
pub fn run_stats(repo: &Repo) -> anyhow::Result<()> {
    let report = repo.manager.stats(&GitCli).or_render(repo.output)?;
    let churn = Churn {
        boards: report.visible(repo.manager.reserved()).collect(),
    };
    emit(repo.output, &churn, None)
}
