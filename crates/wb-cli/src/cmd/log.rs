//! `wb log`: show the activity log, newest first.

use std::io::{self, Write};

use serde::Serialize;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

#[derive(Debug, Serialize)]
struct Activity {
    entries: Vec<String>,
}

impl Report for Activity {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        self.entries.iter().try_for_each(|entry| writeln!(w, "{entry}"))
    }
}

/// Execute `wb log`.
pub fn run_log(repo: &Repo) -> anyhow::Result<()> {
    let entries = repo.manager.log().or_render(repo.output)?;
    emit(repo.output, &Activity { entries }, None)
}
