//! Rewrite the Makefile build target.

use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::MigrationStep;
use crate::util::fs;

const OLD_BUILD_TARGET: &str = "build:\n\tCONNECTOR_VERSION=${VERSION} cargo build --release";

const NEW_BUILD_TARGET: &str = "build:\n\
\tsed -i '/specification:/,/version:/ s/version: .*/version: '\"${VERSION}\"'/' connector.yaml\n\
\tcargo build --release";

/// The version is no longer baked into the binary through an environment
/// variable; the build target now stamps it into `connector.yaml` instead.
pub struct Makefile;

impl MigrationStep for Makefile {
    fn name(&self) -> &'static str {
        "makefile"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        let (path, makefile) =
            fs::read_rel(working_dir, "Makefile").context("could not find Makefile")?;

        let updated = makefile.replace(OLD_BUILD_TARGET, NEW_BUILD_TARGET);
        if updated == makefile {
            tracing::debug!("build target already migrated or not recognized");
            return Ok(());
        }

        fs::write_string(&path, &updated)?;
        tracing::info!(path = %path.display(), "updated build target");

        Ok(())
    }
}
