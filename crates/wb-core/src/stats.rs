//! Per-board churn report built from version-control history.

use serde::Serialize;
use tracing::trace;

use crate::error::BoardError;
use crate::special::ReservedNames;
use crate::store::ContentStore;
use crate::vcs::VcsStats;

/// Totals for one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardStat {
    pub name: String,
    pub additions: u64,
    pub deletions: u64,
}

/// Boards sorted ascending by additions, ties in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub rows: Vec<BoardStat>,
}

impl StatsReport {
    /// Rows meant for display: the scan still includes hidden boards.
    pub fn visible<'a>(&'a self, reserved: &'a ReservedNames) -> impl Iterator<Item = &'a BoardStat> {
        self.rows
            .iter()
            .filter(move |row| !reserved.hidden_from_stats(&row.name))
    }
}

/// Sum the add/delete columns of numstat output.
///
/// A line counts only when it has exactly three tab-separated fields and the
/// first two parse as integers. Anything else (blank separators, binary
/// files reported as `-`, stray text) is skipped.
#[must_use]
pub fn parse_numstat(output: &str) -> (u64, u64) {
    let mut additions = 0_u64;
    let mut deletions = 0_u64;
    for line in output.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 3 {
            continue;
        }
        let (Ok(added), Ok(deleted)) = (fields[0].parse::<u64>(), fields[1].parse::<u64>()) else {
            trace!(line, "skipping unparseable numstat line");
            continue;
        };
        additions = additions.saturating_add(added);
        deletions = deletions.saturating_add(deleted);
    }
    (additions, deletions)
}

/// Scan every live board through `vcs` and rank by additions.
///
/// # Errors
///
/// Enumeration failure, or the first failing VCS query.
pub fn aggregate(store: &ContentStore, vcs: &dyn VcsStats) -> Result<StatsReport, BoardError> {
    let root = store.paths().root();
    let mut rows = Vec::new();
    for name in store.board_names()? {
        let path = store.path_of(&name)?;
        let (additions, deletions) = parse_numstat(&vcs.numstat(root, &path)?);
        rows.push(BoardStat {
            name,
            additions,
            deletions,
        });
    }
    rows.sort_by_key(|row| row.additions);
    Ok(StatsReport { rows })
}
