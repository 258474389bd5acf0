//! Shared test utilities for integration tests.
//!
//! Provides helpers for creating temporary site directories with content
//! pages and a build configuration pointing at them.

#![allow(dead_code)]

use anyhow::Result;
use folio::{Config, DEFAULT_LANGUAGES, DEFAULT_THEME};
use std::path::Path;
use tempfile::TempDir;

/// Creates temporary site root with an empty `content/` directory.
///
/// # Errors
///
/// Returns error if directory creation fails
pub fn create_test_site() -> Result<TempDir> {
    let dir = TempDir::new()?;
    std::fs::create_dir_all(dir.path().join("content"))?;
    Ok(dir)
}

/// Writes file below the site root, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Build configuration for a site root created by [`create_test_site`].
pub fn site_config(root: &Path) -> Config {
    Config {
        content: root.join("content"),
        output: root.join("build"),
        site: root.join("site.toml"),
        theme: DEFAULT_THEME.to_string(),
        languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        base: String::new(),
        fallback: "404.html".to_string(),
        open: false,
        verbose: false,
    }
}

/// Reads generated file below the output directory.
///
/// # Errors
///
/// Returns error if the file does not exist or is not UTF8
pub fn read_output(config: &Config, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(config.output.join(path))?)
}
