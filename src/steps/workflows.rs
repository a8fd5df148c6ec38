//! Install the canonical CI workflow files.

use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::MigrationStep;
use crate::util::fs;

const VALIDATE_WORKFLOW: &str =
    include_str!("../../assets/workflows/validate-generated-files.yaml");
const RELEASE_WORKFLOW: &str = include_str!("../../assets/workflows/release.yaml");

/// Writes the bundled `validate-generated-files` and `release` workflows
/// under `.github/workflows`, normalizing the `.yml`/`.yaml` extension and
/// removing the stale variant.
pub struct Workflows;

impl MigrationStep for Workflows {
    fn name(&self) -> &'static str {
        "workflows"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        install_workflow(working_dir, "validate-generated-files", VALIDATE_WORKFLOW)?;
        install_workflow(working_dir, "release", RELEASE_WORKFLOW)?;
        Ok(())
    }
}

fn install_workflow(working_dir: &Path, stem: &str, content: &str) -> Result<()> {
    let dir = working_dir.join(".github").join("workflows");
    fs::ensure_dir(&dir)?;

    let target = dir.join(format!("{stem}.yaml"));
    fs::write_string(&target, content)?;
    tracing::info!(path = %target.display(), "installed workflow");

    let stale = dir.join(format!("{stem}.yml"));
    if stale.exists() {
        std::fs::remove_file(&stale)
            .with_context(|| format!("removing stale workflow {}", stale.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_installs_both_workflows() {
        let tmp = TempDir::new().unwrap();
        Workflows.apply(tmp.path()).unwrap();

        let dir = tmp.path().join(".github/workflows");
        assert!(dir.join("validate-generated-files.yaml").exists());
        assert!(dir.join("release.yaml").exists());
    }

    #[test]
    fn test_replaces_yml_variant() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".github/workflows");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("release.yml"), "old\n").unwrap();

        Workflows.apply(tmp.path()).unwrap();

        assert!(!dir.join("release.yml").exists());
        assert!(dir.join("release.yaml").exists());
    }

    #[test]
    fn test_rerun_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        Workflows.apply(tmp.path()).unwrap();
        let once = std::fs::read_to_string(
            tmp.path().join(".github/workflows/release.yaml"),
        )
        .unwrap();

        Workflows.apply(tmp.path()).unwrap();
        let twice = std::fs::read_to_string(
            tmp.path().join(".github/workflows/release.yaml"),
        )
        .unwrap();
        assert_eq!(once, twice);
    }
}
