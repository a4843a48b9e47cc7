//! Paths inside a test model installation.
//!
//! An installation root holds `model/<label>/data/config` and the data
//! directory it names. These helpers create roots and write configuration
//! text directly, for tests that need a malformed or hand-edited file.

use anyhow::{Context, Result};
use model_common::config::config_path;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix of every temporary installation root.
pub const ROOT_PREFIX: &str = "velocity_model_";

/// Create an empty installation root, removed when dropped.
pub fn temp_model_root() -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(ROOT_PREFIX)
        .tempdir()
        .context("creating temporary model root")
}

/// Write `text` as the configuration file of `label` under `root`,
/// creating parent directories. Returns the file's path.
pub fn write_config_file(root: &Path, label: &str, text: &str) -> Result<PathBuf> {
    let path = config_path(root, label);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_model_root() {
        let root = temp_model_root().unwrap();
        assert!(root.path().is_dir());
        let name = root.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with(ROOT_PREFIX));
    }

    #[test]
    fn test_write_config_file_creates_layout() {
        let root = temp_model_root().unwrap();
        let path = write_config_file(root.path(), "basin", "nx = 2\n").unwrap();
        assert_eq!(path, root.path().join("model/basin/data/config"));
        assert_eq!(fs::read_to_string(path).unwrap(), "nx = 2\n");
    }
}
