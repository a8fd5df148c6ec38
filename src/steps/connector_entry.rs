//! Point the connector entry at the embedded declarative manifest.

use std::path::Path;

use anyhow::{bail, Result};
use regex::Regex;

use crate::pipeline::MigrationStep;
use crate::util::fs;

const EMBED_CONST: &str = "const SPECIFICATION: &str = include_str!(\"../connector.yaml\");";

/// Import lines the embed constant can be anchored to, most specific first.
const IMPORT_ANCHORS: &[&str] = &["use connector_sdk as sdk;", "use connector_sdk;"];

/// Rewrites `src/connector.rs`: embeds `connector.yaml` into the binary and
/// switches the `specification` field of the connector value to the
/// YAML-backed constructor.
pub struct ConnectorEntry;

impl MigrationStep for ConnectorEntry {
    fn name(&self) -> &'static str {
        "connector-entry"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        let (path, contents) = fs::read_rel(working_dir, "src/connector.rs")?;

        if contents.contains(EMBED_CONST) {
            tracing::debug!(path = %path.display(), "already migrated");
            return Ok(());
        }

        // The specification rewrite below references the constant, so a file
        // where the constant cannot be placed must fail here rather than be
        // left half-edited.
        let Some(anchor) = IMPORT_ANCHORS.iter().find(|a| contents.contains(**a)) else {
            bail!(
                "no connector_sdk import found in {}; cannot place the embedded specification",
                path.display()
            );
        };

        // Every rewrite chains on the running text. An earlier variant of
        // this step re-applied each replacement to the original contents,
        // silently dropping all but the last one.
        let mut updated = contents.replace(anchor, &format!("{anchor}\n\n{EMBED_CONST}"));

        let spec_field = Regex::new(r"(?m)^(?P<indent>[ \t]*)specification: .*$")?;
        updated = spec_field
            .replace(
                &updated,
                "${indent}specification: || sdk::yaml_specification(SPECIFICATION),",
            )
            .into_owned();

        fs::write_string(&path, &updated)?;
        tracing::info!(path = %path.display(), "updated connector entry");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ENTRY: &str = r#"use connector_sdk as sdk;

mod destination;
mod source;
mod spec;

pub fn connector() -> sdk::Connector {
    sdk::Connector {
        specification: spec::specification,
        source: Some(source::new),
        destination: Some(destination::new),
    }
}
"#;

    fn setup(text: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("src")).unwrap();
        std::fs::write(tmp.path().join("src/connector.rs"), text).unwrap();
        tmp
    }

    #[test]
    fn test_embeds_manifest_and_rewrites_specification() {
        let tmp = setup(ENTRY);
        ConnectorEntry.apply(tmp.path()).unwrap();

        let result = std::fs::read_to_string(tmp.path().join("src/connector.rs")).unwrap();
        assert!(result.contains(EMBED_CONST));
        assert!(result
            .contains("        specification: || sdk::yaml_specification(SPECIFICATION),"));
        assert!(!result.contains("spec::specification"));
        // Both rewrites landed; neither replacement was lost.
        assert!(result.contains("source: Some(source::new),"));
    }

    #[test]
    fn test_rerun_is_a_noop() {
        let tmp = setup(ENTRY);
        ConnectorEntry.apply(tmp.path()).unwrap();
        let once = std::fs::read_to_string(tmp.path().join("src/connector.rs")).unwrap();

        ConnectorEntry.apply(tmp.path()).unwrap();
        let twice = std::fs::read_to_string(tmp.path().join("src/connector.rs")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_plain_import_form_is_accepted() {
        let tmp = setup(&ENTRY.replace("use connector_sdk as sdk;", "use connector_sdk;"));
        ConnectorEntry.apply(tmp.path()).unwrap();

        let result = std::fs::read_to_string(tmp.path().join("src/connector.rs")).unwrap();
        assert!(result.contains(&format!("use connector_sdk;\n\n{EMBED_CONST}")));
    }

    #[test]
    fn test_missing_import_fails_without_partial_edits() {
        let entry = ENTRY.replace("use connector_sdk as sdk;\n\n", "");
        let tmp = setup(&entry);

        let err = ConnectorEntry.apply(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("no connector_sdk import"));

        // The specification field was not rewritten to reference a constant
        // that never got inserted.
        let result = std::fs::read_to_string(tmp.path().join("src/connector.rs")).unwrap();
        assert_eq!(result, entry);
    }

    #[test]
    fn test_missing_entry_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(ConnectorEntry.apply(tmp.path()).is_err());
    }
}
