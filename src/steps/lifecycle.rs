//! Shared rewrite logic for lifecycle-implementing connector types.
//!
//! Both the source and destination steps do the same surgery: find the
//! struct that structurally satisfies the lifecycle capability, drop its
//! `parameters` method, flag its `configure` method for manual follow-up,
//! and append a config accessor. All spans are computed against the original
//! text and applied as one patch, so untouched code survives byte for byte.

use std::path::Path;

use anyhow::{Context, Result};

use crate::engine::capability::{self, CapabilitySet};
use crate::engine::locate;
use crate::engine::patch::{self, Patch, Span};
use crate::engine::source::SourceFile;
use crate::util::fs;

/// Rewrite one file in place if it contains a conforming type.
///
/// Returns `true` when the file was updated. A file with no conforming type,
/// or one already migrated (no `parameters` and no `configure` method), is
/// left untouched.
pub(crate) fn rewrite_lifecycle_file(
    path: &Path,
    capability: &CapabilitySet,
    config_type: &str,
) -> Result<bool> {
    let text = fs::read_to_string(path)?;
    let file = SourceFile::parse(path, text)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let Some(conformance) = capability::find_conforming(&file, capability) else {
        return Ok(false);
    };
    tracing::debug!(
        path = %path.display(),
        type_name = %conformance.type_name,
        capability = capability.name,
        "found conforming type"
    );

    // The accessor this rewrite appends doubles as the migration marker.
    if locate::locate_method(&file, &conformance.type_name, "config").is_some() {
        tracing::debug!(path = %path.display(), "already migrated");
        return Ok(false);
    }

    let parameters = locate::locate_method(&file, &conformance.type_name, "parameters");
    let configure = locate::locate_method(&file, &conformance.type_name, "configure");
    if parameters.is_none() && configure.is_none() {
        return Ok(false);
    }

    let mut patch = Patch::new();

    if let Some(method) = &parameters {
        patch.delete(with_trailing_newline(file.text(), method.span));
    }

    if let Some(method) = &configure {
        let indent = line_indent(file.text(), method.span.start);
        patch.insert_before(method.span.start, advisory_comment(&indent));
    }

    patch.insert_after(
        conformance.decl_span.end,
        config_accessor(&conformance.type_name, config_type),
    );

    let updated = patch::apply(file.text(), &patch);
    fs::write_string(path, &updated)?;

    Ok(true)
}

/// Extend a deletion span past its trailing newline so no empty line is
/// left where the method used to be.
fn with_trailing_newline(text: &str, span: Span) -> Span {
    let mut end = span.end;
    if text[end..].starts_with('\n') {
        end += 1;
    }
    Span::new(span.start, end)
}

/// Leading whitespace of the line starting at `offset`.
fn line_indent(text: &str, offset: usize) -> String {
    text[offset..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

fn advisory_comment(indent: &str) -> String {
    format!(
        "{indent}// TODO: this method needs to be removed. Any custom logic in configure()\n\
         {indent}// belongs in the configuration struct's validate() method.\n"
    )
}

fn config_accessor(type_name: &str, config_type: &str) -> String {
    format!(
        "\n\nimpl {type_name} {{\n    pub fn config(&self) -> &sdk::{config_type} {{\n        &self.config\n    }}\n}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::capability::SOURCE_LIFECYCLE;
    use tempfile::TempDir;

    const FIXTURE: &str = r#"use connector_sdk as sdk;

pub struct FileSource {
    config: sdk::SourceConfig,
}

impl FileSource {
    pub fn open(&mut self) -> sdk::Result<()> {
        self.seek_to_start()
    }

    pub fn read(&mut self) -> sdk::Result<sdk::Record> {
        self.next_record()
    }

    pub fn ack(&mut self, position: u64) -> sdk::Result<()> {
        self.positions.confirm(position)
    }

    pub fn teardown(&mut self) -> sdk::Result<()> {
        self.close_handles()
    }

    /// Declares the connector parameters.
    pub fn parameters(&self) -> sdk::Parameters {
        sdk::Parameters::default()
    }

    pub fn configure(&mut self, raw: &sdk::RawConfig) -> sdk::Result<()> {
        self.config = sdk::parse_config(raw)?;
        self.config.validate_paths()
    }
}
"#;

    fn write_fixture(dir: &TempDir, text: &str) -> std::path::PathBuf {
        let path = dir.path().join("source.rs");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_rewrites_conforming_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_fixture(&tmp, FIXTURE);

        let updated = rewrite_lifecycle_file(&path, &SOURCE_LIFECYCLE, "SourceConfig").unwrap();
        assert!(updated);

        let result = std::fs::read_to_string(&path).unwrap();

        // parameters() is gone, doc comment included.
        assert!(!result.contains("fn parameters"));
        assert!(!result.contains("Declares the connector parameters"));

        // The advisory sits directly above configure().
        let advisory_pos = result.find("// TODO: this method needs to be removed").unwrap();
        let configure_pos = result.find("pub fn configure").unwrap();
        assert!(advisory_pos < configure_pos);

        // The accessor follows the struct declaration.
        assert!(result.contains("impl FileSource {\n    pub fn config(&self) -> &sdk::SourceConfig {"));

        // Lifecycle method bodies are untouched, byte for byte.
        for body in [
            "pub fn open(&mut self) -> sdk::Result<()> {\n        self.seek_to_start()\n    }",
            "pub fn read(&mut self) -> sdk::Result<sdk::Record> {\n        self.next_record()\n    }",
            "pub fn ack(&mut self, position: u64) -> sdk::Result<()> {\n        self.positions.confirm(position)\n    }",
            "pub fn teardown(&mut self) -> sdk::Result<()> {\n        self.close_handles()\n    }",
            "self.config = sdk::parse_config(raw)?;\n        self.config.validate_paths()",
        ] {
            assert!(result.contains(body), "body changed: {body}");
        }

        // The rewritten file still parses.
        syn::parse_file(&result).unwrap();
    }

    #[test]
    fn test_non_conforming_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = write_fixture(&tmp, "pub struct Helper;\nimpl Helper { pub fn open(&self) {} }\n");

        let updated = rewrite_lifecycle_file(&path, &SOURCE_LIFECYCLE, "SourceConfig").unwrap();
        assert!(!updated);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "pub struct Helper;\nimpl Helper { pub fn open(&self) {} }\n"
        );
    }

    #[test]
    fn test_rerun_on_migrated_file_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let path = write_fixture(&tmp, FIXTURE);

        rewrite_lifecycle_file(&path, &SOURCE_LIFECYCLE, "SourceConfig").unwrap();
        let once = std::fs::read_to_string(&path).unwrap();

        // The appended config() accessor marks the file as migrated; the
        // second pass must leave it alone even though configure() remains.
        let updated = rewrite_lifecycle_file(&path, &SOURCE_LIFECYCLE, "SourceConfig").unwrap();
        assert!(!updated);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), once);
    }

    #[test]
    fn test_parse_error_aborts_without_partial_edits() {
        let tmp = TempDir::new().unwrap();
        let path = write_fixture(&tmp, "pub struct Broken {\n");

        let err = rewrite_lifecycle_file(&path, &SOURCE_LIFECYCLE, "SourceConfig").unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pub struct Broken {\n");
    }
}
