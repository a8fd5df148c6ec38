//! Rewrite the source connector to the specgen generation.

use std::path::Path;

use anyhow::Result;

use crate::engine::capability::SOURCE_LIFECYCLE;
use crate::pipeline::MigrationStep;
use crate::steps::lifecycle::rewrite_lifecycle_file;
use crate::util::fs;

/// Finds the file declaring the source lifecycle type and rewrites its
/// method set for the declarative-specification SDK.
pub struct UpdateSource;

impl MigrationStep for UpdateSource {
    fn name(&self) -> &'static str {
        "update-source"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        let candidates = fs::glob_files(working_dir, &["src/**/*source*.rs".to_string()])?;

        for path in candidates {
            if rewrite_lifecycle_file(&path, &SOURCE_LIFECYCLE, "SourceConfig")? {
                tracing::info!(path = %path.display(), "updated source file");
                break;
            }
        }

        Ok(())
    }
}
