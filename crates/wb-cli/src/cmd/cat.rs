//! `wb cat`: print a board to stdout.

use std::io::{self, Write};

use clap::Args;
use serde::{Serialize, Serializer};

use super::{OrRender, Repo};
use crate::output::{Report, emit};

/// Arguments for `wb cat`.
#[derive(Args, Debug)]
pub struct CatArgs {
    /// Board to print (default board when omitted).
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
struct BoardContent {
    name: String,
    created: bool,
    #[serde(serialize_with = "lossy_utf8")]
    content: Vec<u8>,
}

fn lossy_utf8<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&String::from_utf8_lossy(bytes))
}

impl Report for BoardContent {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        w.write_all(&self.content)
    }
}

/// Execute `wb cat`.
pub fn run_cat(args: &CatArgs, repo: &Repo) -> anyhow::Result<()> {
    let name = repo.board_or_default(args.name.as_deref());
    let logged = repo
        .manager
        .view(name, &repo.editor())
        .or_render(repo.output)?;
    let view = logged.value;
    let board = BoardContent {
        name: view.name,
        created: view.created,
        content: view.content,
    };
    emit(repo.output, &board, logged.log_failure.as_ref())
}
