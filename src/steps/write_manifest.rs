//! Generate the declarative connector.yaml manifest.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::engine::extract;
use crate::engine::source::SourceFile;
use crate::pipeline::MigrationStep;
use crate::util::fs;

const MANIFEST_FILE: &str = "connector.yaml";
const MANIFEST_SCHEMA_VERSION: &str = "1.0";
const FACTORY_FN: &str = "specification";
const SPEC_FIELDS: &[&str] = &["name", "summary", "description", "version", "author"];

#[derive(Debug, Serialize)]
struct ManifestDoc {
    version: String,
    specification: SpecificationFields,
}

/// Flat record of the extractable specification fields. Fields whose values
/// are computed in the factory function stay absent from the manifest.
#[derive(Debug, Default, Serialize)]
struct SpecificationFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
}

/// Extracts the specification fields from `src/spec.rs` and writes
/// `connector.yaml` next to the project manifest.
pub struct WriteManifest;

impl MigrationStep for WriteManifest {
    fn name(&self) -> &'static str {
        "write-manifest"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        let (path, contents) = fs::read_rel(working_dir, "src/spec.rs")?;
        let file = SourceFile::parse(&path, contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let mut record = extract::extract_literal_fields(&file, FACTORY_FN, SPEC_FIELDS)
            .context("extract specification fields")?;

        let doc = ManifestDoc {
            version: MANIFEST_SCHEMA_VERSION.to_string(),
            specification: SpecificationFields {
                name: record.remove("name"),
                summary: record.remove("summary"),
                description: record.remove("description"),
                version: record.remove("version"),
                author: record.remove("author"),
            },
        };

        let yaml = serde_yaml::to_string(&doc).context("serialize connector.yaml")?;
        fs::write_string(&working_dir.join(MANIFEST_FILE), &yaml)?;
        tracing::info!(path = MANIFEST_FILE, "wrote manifest");

        Ok(())
    }
}
