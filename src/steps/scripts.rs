//! Install the bundled helper scripts.

use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::MigrationStep;
use crate::util::fs;

const BUMP_VERSION_SH: &str = include_str!("../../assets/scripts/bump-version.sh");
const TAG_SH: &str = include_str!("../../assets/scripts/tag.sh");

const SCRIPTS: &[(&str, &str)] = &[("bump-version.sh", BUMP_VERSION_SH), ("tag.sh", TAG_SH)];

/// Copies the bundled release helper scripts into `scripts/`, marking them
/// executable on unix.
pub struct Scripts;

impl MigrationStep for Scripts {
    fn name(&self) -> &'static str {
        "scripts"
    }

    fn apply(&self, working_dir: &Path) -> Result<()> {
        let dest_dir = working_dir.join("scripts");
        fs::ensure_dir(&dest_dir)?;

        for (name, content) in SCRIPTS {
            let dest = dest_dir.join(name);
            fs::write_string(&dest, content)?;
            make_executable(&dest)
                .with_context(|| format!("setting permissions on {}", dest.display()))?;
            tracing::info!(path = %dest.display(), "installed script");
        }

        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
