//! `wb ls`: show the list index, or the trash.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use wb_core::Listing;

use super::{OrRender, Repo};
use crate::output::{Report, emit};

/// Arguments for `wb ls`.
#[derive(Args, Debug)]
pub struct LsArgs {
    /// List trashed boards instead.
    #[arg(long)]
    pub trash: bool,
}

/// Where the listed lines came from.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Source {
    Index,
    Directory,
    Trash,
}

#[derive(Debug, Serialize)]
struct Lines {
    source: Source,
    lines: Vec<String>,
}

impl Report for Lines {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        self.lines.iter().try_for_each(|line| writeln!(w, "{line}"))
    }
}

/// Execute `wb ls`.
pub fn run_ls(args: &LsArgs, repo: &Repo) -> anyhow::Result<()> {
    let listed = if args.trash {
        Lines {
            source: Source::Trash,
            lines: repo.manager.trashed().or_render(repo.output)?,
        }
    } else {
        match repo.manager.list().or_render(repo.output)? {
            Listing::Index(lines) => Lines {
                source: Source::Index,
                lines,
            },
            Listing::Directory(lines) => Lines {
                source: Source::Directory,
                lines,
            },
        }
    };
    emit(repo.output, &listed, None)
}
