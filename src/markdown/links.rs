//! Link resolution between Markdown pages.

use anyhow::{Context, Result, bail};
use std::path::{Component, Path, PathBuf};

/// Resolves links in Markdown pages to generated site URLs.
///
/// Transforms links between content pages (./about.md, ../index.md) into
/// URLs of the generated HTML pages under the deployment base path
/// (/portfolio/about.html).
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base: String,
    current_path: PathBuf,
}

impl LinkResolver {
    /// Creates link resolver for the page at `current_path`.
    ///
    /// # Arguments
    ///
    /// * `base`: Deployment base path, empty or starting with `/`
    /// * `current_path`: Path of the page being rendered, relative to the
    ///   content directory
    pub fn new(base: impl Into<String>, current_path: impl AsRef<Path>) -> Self {
        Self {
            base: base.into(),
            current_path: current_path.as_ref().to_path_buf(),
        }
    }

    /// Resolves link to a site URL.
    ///
    /// Handles different link types:
    /// - Links with a scheme (https:, mailto:) remain unchanged
    /// - Protocol relative (//cdn) and anchor (#section) links remain unchanged
    /// - Site rooted paths (/about.md) gain the base prefix
    /// - Relative paths resolve against the current page directory
    /// - Targets ending in `.md` become `.html` unless `is_image` is set
    ///
    /// Query and fragment suffixes are preserved.
    ///
    /// # Errors
    ///
    /// Returns error if a relative path escapes the content root or
    /// contains invalid UTF8.
    pub fn resolve(&self, link: &str, is_image: bool) -> Result<String> {
        if link.is_empty() || link.starts_with('#') || link.starts_with("//") || has_scheme(link)
        {
            return Ok(link.to_string());
        }

        let split = link.find(['#', '?']).unwrap_or(link.len());
        let (target, suffix) = link.split_at(split);

        let joined = if let Some(rooted) = target.strip_prefix('/') {
            PathBuf::from(rooted)
        } else {
            let current_dir = self.current_path.parent().unwrap_or_else(|| Path::new(""));
            current_dir.join(target)
        };

        let normalized = normalize_path(&joined).context("Failed to normalize link path")?;
        let mut path = normalized
            .to_str()
            .context("Link path contains invalid UTF8")?
            .to_string();

        if !is_image && let Some(stem) = path.strip_suffix(".md") {
            path = format!("{}.html", stem);
        }

        if target.ends_with('/') && !path.is_empty() {
            path.push('/');
        }

        Ok(format!("{}/{}{}", self.base, path, suffix))
    }
}

/// Returns true for links such as `https://…`, `mailto:…` or `tel:…`.
fn has_scheme(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Normalizes path by resolving `..` and `.` components.
///
/// Returns error if the path escapes the content root.
fn normalize_path(path: &Path) -> Result<PathBuf> {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(c) => components.push(c),
            Component::ParentDir => {
                if components.pop().is_none() {
                    bail!("Path escapes content root: {}", path.display());
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    Ok(components.iter().collect())
}
