//! Create the migration branch and commit the results.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::pipeline::MigrationStep;
use crate::util::process::{find_executable, ProcessBuilder};

const MIGRATION_BRANCH: &str = "migrate/specgen";
const COMMIT_MESSAGE: &str = "Generate connector.yaml";

/// Runs the git sequence around a migration: checkout main, pull, branch,
/// add, commit. Each command's exit status is the sole success signal, and
/// the first failure halts the sequence.
///
/// Not part of the default pipeline; run it explicitly with
/// `--step commit-branch`.
pub struct CommitBranch;

impl MigrationStep for CommitBranch {
    fn name(&self) -> &'static str {
        "commit-branch"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        if find_executable("git").is_none() {
            bail!("`git` not found in PATH");
        }

        git(working_dir, &["checkout", "main"]).context("failed to checkout main")?;
        git(working_dir, &["pull", "origin", "main"]).context("failed to pull")?;
        git(working_dir, &["checkout", "-b", MIGRATION_BRANCH])
            .context("failed to create branch")?;
        git(working_dir, &["add", "."]).context("failed to stage changes")?;
        git(working_dir, &["commit", "-am", COMMIT_MESSAGE]).context("failed to commit")?;

        tracing::info!(branch = MIGRATION_BRANCH, "committed migration");
        Ok(())
    }
}

fn git(working_dir: &Path, args: &[&str]) -> Result<()> {
    ProcessBuilder::new("git")
        .args(args)
        .cwd(working_dir)
        .exec_and_check()?;
    Ok(())
}
