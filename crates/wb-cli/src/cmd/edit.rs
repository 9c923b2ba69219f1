//! `wb [NAME]`: open a board in the editor.
//!
//! The default board is created on first use; any other missing name must
//! be a shortcut or the command fails.

use std::io::{self, Write};

use serde::Serialize;
use wb_core::SpecialBoard;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

#[derive(Debug, Serialize)]
struct Edited<'a> {
    name: &'a str,
    created: bool,
    modified: bool,
}

impl Report for Edited<'_> {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        if self.created {
            writeln!(w, "✓ created board '{}'", self.name)?;
        }
        if self.modified {
            writeln!(w, "✓ saved '{}'", self.name)?;
        }
        Ok(())
    }
}

/// Execute the bare `wb [NAME]` form.
pub fn run_edit(name: Option<&str>, repo: &Repo) -> anyhow::Result<()> {
    let requested = repo.board_or_default(name);
    let mgr = &repo.manager;
    let editor = repo.editor();

    let first_use = !mgr.store().exists(requested)
        && mgr.reserved().classify(requested) == Some(SpecialBoard::Default);
    let logged = if first_use {
        mgr.create_and_edit(requested, &editor)
    } else {
        mgr.edit(requested, &editor)
    }
    .or_render(repo.output)?;

    let edited = Edited {
        name: &logged.value.name,
        created: first_use,
        modified: logged.value.modified,
    };
    emit(repo.output, &edited, logged.log_failure.as_ref())
}
