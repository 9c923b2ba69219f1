//! `wb empty-trash`: permanently delete every trashed board.

use std::io::{self, Write};

use serde::Serialize;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

#[derive(Debug, Serialize)]
struct Purged {
    purged: usize,
}

impl Report for Purged {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "✓ purged {} board(s) from trash", self.purged)
    }
}

/// Execute `wb empty-trash`.
pub fn run_empty_trash(repo: &Repo) -> anyhow::Result<()> {
    let logged = repo.manager.empty_trash().or_render(repo.output)?;
    let purged = Purged {
        purged: logged.value,
    };
    emit(repo.output, &purged, logged.log_failure.as_ref())
}
