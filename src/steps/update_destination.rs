//! Rewrite the destination connector to the specgen generation.

use std::path::Path;

use anyhow::Result;

use crate::engine::capability::DESTINATION_LIFECYCLE;
use crate::pipeline::MigrationStep;
use crate::steps::lifecycle::rewrite_lifecycle_file;
use crate::util::fs;

/// Destination counterpart of [`UpdateSource`](crate::steps::UpdateSource).
pub struct UpdateDestination;

impl MigrationStep for UpdateDestination {
    fn name(&self) -> &'static str {
        "update-destination"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        let candidates = fs::glob_files(working_dir, &["src/**/*destination*.rs".to_string()])?;

        for path in candidates {
            if rewrite_lifecycle_file(&path, &DESTINATION_LIFECYCLE, "DestinationConfig")? {
                tracing::info!(path = %path.display(), "updated destination file");
                break;
            }
        }

        Ok(())
    }
}
