//! Upgrade the SDK dependency with cargo.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::pipeline::MigrationStep;
use crate::util::process::{find_executable, ProcessBuilder};

const SDK_CRATE: &str = "connector-sdk";
const SDK_VERSION: &str = "0.13";

/// Runs `cargo add connector-sdk@0.13` followed by `cargo update` in the
/// working directory. Non-zero exit from either invocation fails the step
/// with the captured output.
pub struct UpgradeSdk;

impl MigrationStep for UpgradeSdk {
    fn name(&self) -> &'static str {
        "upgrade-sdk"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        if find_executable("cargo").is_none() {
            bail!("`cargo` not found in PATH");
        }

        let add = ProcessBuilder::new("cargo")
            .args(["add", &format!("{SDK_CRATE}@{SDK_VERSION}")])
            .cwd(working_dir);
        add.exec_and_check()
            .with_context(|| format!("could not upgrade {SDK_CRATE}"))?;

        let update = ProcessBuilder::new("cargo").arg("update").cwd(working_dir);
        let output = update
            .exec_and_check()
            .context("failed to refresh the lockfile")?;

        if !output.stdout.is_empty() {
            tracing::debug!(
                stdout = %String::from_utf8_lossy(&output.stdout),
                "cargo update"
            );
        }

        Ok(())
    }
}
