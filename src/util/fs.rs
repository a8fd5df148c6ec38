//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read `rel` inside `base`. Returns the resolved path along with the
/// contents so callers can write the file back where they found it.
pub fn read_rel(base: &Path, rel: &str) -> Result<(PathBuf, String)> {
    let path = base.join(rel);
    let contents = read_to_string(&path)?;
    Ok((path, contents))
}

/// Find files matching glob patterns relative to a base directory.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns {
        // Make pattern absolute by joining with base
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in
            glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        results.push(path);
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("source.rs"), "pub struct S;").unwrap();
        fs::write(src.join("http_source.rs"), "pub struct H;").unwrap();
        fs::write(src.join("destination.rs"), "pub struct D;").unwrap();

        let files = glob_files(tmp.path(), &["src/**/*source*.rs".to_string()]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_read_rel_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_rel(tmp.path(), "Cargo.toml").unwrap_err();
        assert!(err.to_string().contains("failed to read file"));
    }
}
