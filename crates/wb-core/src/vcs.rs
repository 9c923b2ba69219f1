//! External collaborators: version control and object-storage sync.
//!
//! The manager only needs pass/fail (or raw text) from these. The
//! implementations here shell out to `git` and `aws`.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::BoardError;

/// Per-file churn history.
pub trait VcsStats {
    /// Raw `<added>\t<deleted>\t<path>` lines for every commit touching `file`.
    ///
    /// # Errors
    ///
    /// [`BoardError::Collaborator`] when the query cannot run.
    fn numstat(&self, repo: &Path, file: &Path) -> Result<String, BoardError>;
}

/// Commit everything under the repository root and push it.
pub trait Publisher {
    /// # Errors
    ///
    /// [`BoardError::Collaborator`] when any step fails.
    fn commit_and_push(&self, repo: &Path, message: &str) -> Result<(), BoardError>;
}

/// Bulk mirror of a directory to and from object storage.
pub trait BulkSync {
    /// Make the remote an exact copy of `dir`.
    ///
    /// # Errors
    ///
    /// [`BoardError::Collaborator`] on failure.
    fn upload(&self, dir: &Path) -> Result<(), BoardError>;

    /// Download every remote object into `dir`, overwriting local files.
    ///
    /// # Errors
    ///
    /// [`BoardError::Collaborator`] on failure.
    fn download(&self, dir: &Path) -> Result<(), BoardError>;
}

/// Run `cmd`, returning stdout on success and stderr in the error otherwise.
fn run_captured(what: &str, cmd: &mut Command) -> Result<String, BoardError> {
    debug!(command = ?cmd, "running external command");
    let output = cmd
        .output()
        .map_err(|e| BoardError::collaborator(what, e.to_string()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BoardError::collaborator(
            what,
            format!("{} ({})", stderr.trim(), output.status),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// The `git` command line.
#[derive(Debug, Clone, Default)]
pub struct GitCli;

impl GitCli {
    fn git<I, S>(repo: &Path, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(repo).args(args);
        cmd
    }
}

impl VcsStats for GitCli {
    fn numstat(&self, repo: &Path, file: &Path) -> Result<String, BoardError> {
        let mut cmd = Self::git(repo, ["log", "--pretty=tformat:", "--numstat", "--"]);
        cmd.arg(file);
        run_captured("git log", &mut cmd)
    }
}

impl Publisher for GitCli {
    fn commit_and_push(&self, repo: &Path, message: &str) -> Result<(), BoardError> {
        run_captured("git add", &mut Self::git(repo, ["add", "-A"]))?;
        run_captured("git commit", &mut Self::git(repo, ["commit", "-m", message]))?;
        run_captured("git push", &mut Self::git(repo, ["push"]))?;
        Ok(())
    }
}

/// `aws s3 sync` against a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsCliSync {
    bucket: String,
    profile: Option<String>,
    region: Option<String>,
}

impl AwsCliSync {
    #[must_use]
    pub const fn new(bucket: String, profile: Option<String>, region: Option<String>) -> Self {
        Self {
            bucket,
            profile,
            region,
        }
    }

    fn remote(&self) -> String {
        format!("s3://{}", self.bucket)
    }

    fn sync(&self, from: &OsStr, to: &OsStr, delete: bool) -> Command {
        let mut cmd = Command::new("aws");
        cmd.args(["s3", "sync"]).arg(from).arg(to);
        if delete {
            cmd.arg("--delete");
        }
        if let Some(profile) = &self.profile {
            cmd.env("AWS_PROFILE", profile);
        }
        if let Some(region) = &self.region {
            cmd.env("AWS_REGION", region);
        }
        cmd
    }
}

impl BulkSync for AwsCliSync {
    fn upload(&self, dir: &Path) -> Result<(), BoardError> {
        let remote = self.remote();
        let mut cmd = self.sync(dir.as_os_str(), OsStr::new(&remote), true);
        run_captured("aws s3 sync (upload)", &mut cmd).map(drop)
    }

    fn download(&self, dir: &Path) -> Result<(), BoardError> {
        let remote = self.remote();
        let mut cmd = self.sync(OsStr::new(&remote), dir.as_os_str(), false);
        run_captured("aws s3 sync (download)", &mut cmd).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_commands_are_scoped_to_repo() {
        let cmd = GitCli::git(Path::new("/repo"), ["push"]);
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(cmd.get_program(), "git");
        assert_eq!(args, ["-C", "/repo", "push"]);
    }

    #[test]
    fn upload_mirrors_with_delete() {
        let sync = AwsCliSync::new("boards-bucket".into(), Some("me".into()), None);
        let cmd = sync.sync(OsStr::new("/repo/boards"), OsStr::new(&sync.remote()), true);
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["s3", "sync", "/repo/boards", "s3://boards-bucket", "--delete"]);
        let envs: Vec<_> = cmd.get_envs().collect();
        assert_eq!(envs, [(OsStr::new("AWS_PROFILE"), Some(OsStr::new("me")))]);
    }

    #[test]
    fn failing_command_reports_collaborator_error() {
        let mut cmd = Command::new("definitely-not-a-real-binary-wb");
        let err = run_captured("missing tool", &mut cmd).expect_err("spawn fails");
        assert!(matches!(err, BoardError::Collaborator { .. }));
    }
}
