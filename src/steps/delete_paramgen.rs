//! Remove paramgen artifacts from the project tree.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use walkdir::WalkDir;

use crate::pipeline::MigrationStep;
use crate::util::fs;

const GENERATED_MARKER: &str = "// Code generated by connector-paramgen. DO NOT EDIT.";
const DIRECTIVE_PATTERN: &str = r"(?m)^[ \t]*// paramgen:generate.*\n";

/// Walks the working tree, deleting generated parameter files and stripping
/// generator directive lines from the files that referenced them.
pub struct DeleteParamgen;

impl MigrationStep for DeleteParamgen {
    fn name(&self) -> &'static str {
        "delete-paramgen"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        let directive = Regex::new(DIRECTIVE_PATTERN)?;

        let walker = WalkDir::new(working_dir)
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git" && e.file_name() != "target");

        for entry in walker {
            let entry = entry.context("error walking the working tree")?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();

            // Binary artifacts are not candidates.
            let Ok(contents) = std::fs::read_to_string(path) else {
                continue;
            };

            if contents.contains(GENERATED_MARKER) {
                tracing::info!(path = %path.display(), "deleting generated file");
                std::fs::remove_file(path)
                    .with_context(|| format!("removing file {}", path.display()))?;
                continue;
            }

            if directive.is_match(&contents) {
                tracing::info!(path = %path.display(), "removing paramgen directive");
                let updated = directive.replace_all(&contents, "");
                fs::write_string(path, &updated)?;
            }
        }

        Ok(())
    }
}
