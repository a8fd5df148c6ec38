//! Swap the paramgen dev-dependency for the new SDK CLI.

use std::path::Path;

use anyhow::{Context, Result};
use toml_edit::{value, DocumentMut, Item};

use crate::pipeline::MigrationStep;
use crate::util::fs;

const OLD_DEP: &str = "connector-paramgen";
const NEW_DEP: &str = "connector-sdk-cli";
const NEW_DEP_VERSION: &str = "0.13";

/// In the project `Cargo.toml`, replaces the `connector-paramgen` dependency
/// with `connector-sdk-cli`, preserving the rest of the file's formatting.
pub struct UpdateDeps;

impl MigrationStep for UpdateDeps {
    fn name(&self) -> &'static str {
        "update-deps"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        let manifest_path = working_dir.join("Cargo.toml");
        let content = fs::read_to_string(&manifest_path)?;
        let mut doc: DocumentMut = content
            .parse()
            .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

        let mut changed = false;
        for table_name in ["dev-dependencies", "dependencies", "build-dependencies"] {
            let Some(table) = doc.get_mut(table_name).and_then(Item::as_table_mut) else {
                continue;
            };
            if table.remove(OLD_DEP).is_some() {
                table[NEW_DEP] = value(NEW_DEP_VERSION);
                changed = true;
            }
        }

        if !changed {
            tracing::debug!("no {OLD_DEP} dependency found; nothing to do");
            return Ok(());
        }

        fs::write_string(&manifest_path, &doc.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"[package]
name = "connector-postgres"
version = "0.5.0"
edition = "2021"

[dependencies]
serde = "1.0" # keep this comment

[dev-dependencies]
connector-paramgen = "0.12"
tempfile = "3.10"
"#;

    #[test]
    fn test_swaps_dev_dependency() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("Cargo.toml"), MANIFEST).unwrap();

        UpdateDeps.apply(tmp.path()).unwrap();

        let result = std::fs::read_to_string(tmp.path().join("Cargo.toml")).unwrap();
        assert!(!result.contains("connector-paramgen"));
        assert!(result.contains("connector-sdk-cli"));
        // Untouched entries keep their formatting.
        assert!(result.contains("serde = \"1.0\" # keep this comment"));
        assert!(result.contains("tempfile = \"3.10\""));
    }

    #[test]
    fn test_rerun_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("Cargo.toml"), MANIFEST).unwrap();

        UpdateDeps.apply(tmp.path()).unwrap();
        let once = std::fs::read_to_string(tmp.path().join("Cargo.toml")).unwrap();

        UpdateDeps.apply(tmp.path()).unwrap();
        let twice = std::fs::read_to_string(tmp.path().join("Cargo.toml")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_manifest_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(UpdateDeps.apply(tmp.path()).is_err());
    }
}
