//! Content discovery and output path mapping.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Markdown page found in the content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    source: PathBuf,
    relative: PathBuf,
}

impl Page {
    /// Creates page from its file path and path under the content directory.
    pub fn new(source: impl Into<PathBuf>, relative: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            relative: relative.into(),
        }
    }

    /// Path of the Markdown source file.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Path under the content directory, e.g. `blog/first-post.md`.
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Path of the generated HTML under the output directory.
    pub fn output_path(&self) -> PathBuf {
        self.relative.with_extension("html")
    }

    /// Output path joined with `/`, e.g. `blog/post.html`.
    pub fn site_path(&self) -> String {
        slash_path(&self.output_path())
    }

    /// Site URL of the generated page under `base`.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base, self.site_path())
    }

    /// True for the site landing page (`index.md` at the content root).
    pub fn is_index(&self) -> bool {
        self.relative == Path::new("index.md")
    }

    /// Title derived from the file name, used when the page has no heading.
    ///
    /// `my-first_post.md` becomes `my first post`.
    pub fn fallback_title(&self) -> String {
        self.relative
            .file_stem()
            .map(|stem| stem.to_string_lossy().replace(['-', '_'], " "))
            .unwrap_or_default()
    }
}

/// Non-Markdown file copied to the output unchanged (images, PDFs, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    source: PathBuf,
    relative: PathBuf,
}

impl Asset {
    /// Path of the source file.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Path under the content directory, also its path under the output.
    pub fn relative(&self) -> &Path {
        &self.relative
    }
}

/// Finds Markdown pages below `content_dir`.
///
/// Recurses into subdirectories, skips hidden entries (names starting with
/// `.`), and returns pages sorted by relative path.
///
/// # Errors
///
/// Returns error if a directory cannot be read.
pub fn discover_pages(content_dir: impl AsRef<Path>) -> Result<Vec<Page>> {
    Ok(collect_content(content_dir.as_ref())?
        .into_iter()
        .filter(|(_, relative)| is_markdown(relative))
        .map(|(source, relative)| Page::new(source, relative))
        .collect())
}

/// Finds every non-Markdown file below `content_dir`.
///
/// Uses the same walk as [`discover_pages`]: hidden entries are skipped and
/// results are sorted by relative path.
///
/// # Errors
///
/// Returns error if a directory cannot be read.
pub fn discover_assets(content_dir: impl AsRef<Path>) -> Result<Vec<Asset>> {
    Ok(collect_content(content_dir.as_ref())?
        .into_iter()
        .filter(|(_, relative)| !is_markdown(relative))
        .map(|(source, relative)| Asset { source, relative })
        .collect())
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Joins path components with `/` regardless of platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Lists `(source, relative)` for every visible file, sorted by relative path.
fn collect_content(content_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut files = Vec::new();
    collect_files(content_dir, Path::new(""), &mut files)?;
    files.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(files)
}

fn collect_files(dir: &Path, relative: &Path, files: &mut Vec<(PathBuf, PathBuf)>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read content directory: {}", dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        let relative = relative.join(&name);

        if file_type.is_dir() {
            collect_files(&path, &relative, files)?;
        } else {
            files.push((path, relative));
        }
    }

    Ok(())
}
