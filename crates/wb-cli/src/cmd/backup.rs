//! `wb backup` / `wb restore`: mirror `boards/` to and from an S3 bucket.
//!
//! The bucket comes from the `[backup]` table of the config file; credentials
//! are whatever the `aws` CLI resolves for the configured profile.

use std::io::{self, Write};

use serde::Serialize;
use wb_core::vcs::AwsCliSync;

use super::{OrRender, Repo, fail};
use crate::output::{Problem, Report, emit};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Direction {
    Upload,
    Download,
}

#[derive(Debug, Serialize)]
struct Synced<'a> {
    direction: Direction,
    bucket: &'a str,
}

impl Report for Synced<'_> {
    fn human(&self, w: &mut dyn Write) -> io::Result<()> {
        match self.direction {
            Direction::Upload => writeln!(w, "✓ backed up boards to s3://{}", self.bucket),
            Direction::Download => writeln!(w, "✓ restored boards from s3://{}", self.bucket),
        }
    }
}

fn bulk_sync(repo: &Repo) -> anyhow::Result<(AwsCliSync, &str)> {
    let backup = &repo.config.backup;
    let Some(bucket) = backup.bucket.as_deref().filter(|b| !b.trim().is_empty()) else {
        return Err(fail(
            repo.output,
            &Problem::coded(
                "E1001",
                "no backup bucket configured",
                "add `[backup]` with `bucket = \"...\"` to wb/config.toml",
            ),
        ));
    };
    let sync = AwsCliSync::new(
        bucket.to_string(),
        backup.profile.clone(),
        backup.region.clone(),
    );
    Ok((sync, bucket))
}

/// Execute `wb backup`.
pub fn run_backup(repo: &Repo) -> anyhow::Result<()> {
    let (sync, bucket) = bulk_sync(repo)?;
    let logged = repo.manager.backup(&sync).or_render(repo.output)?;
    let synced = Synced {
        direction: Direction::Upload,
        bucket,
    };
    emit(repo.output, &synced, logged.log_failure.as_ref())
}

/// Execute `wb restore`.
pub fn run_restore(repo: &Repo) -> anyhow::Result<()> {
    let (sync, bucket) = bulk_sync(repo)?;
    let logged = repo.manager.restore(&sync).or_render(repo.output)?;
    let synced = Synced {
        direction: Direction::Download,
        bucket,
    };
    emit(repo.output, &synced, logged.log_failure.as_ref())
}
