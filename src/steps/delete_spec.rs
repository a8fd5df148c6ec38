//! Remove the imperative specification module.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::pipeline::MigrationStep;

/// Deletes `src/spec.rs` once `connector.yaml` carries the specification.
/// The manifest check is the ordering precondition: this step only makes
/// sense after `write-manifest` has run.
pub struct DeleteSpec;

impl MigrationStep for DeleteSpec {
    fn name(&self) -> &'static str {
        "delete-spec"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        let manifest = working_dir.join("connector.yaml");
        if !manifest.exists() {
            bail!("connector.yaml does not exist yet; run write-manifest first");
        }

        let spec = working_dir.join("src").join("spec.rs");
        if !spec.exists() {
            tracing::debug!("src/spec.rs already removed");
            return Ok(());
        }

        std::fs::remove_file(&spec)
            .with_context(|| format!("removing file {}", spec.display()))?;
        tracing::info!(path = %spec.display(), "deleted specification module");

        Ok(())
    }
}
