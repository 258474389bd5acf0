//! Static site generation pass.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::highlight::Highlighter;
use crate::layout::{self, PageContext};
use crate::markdown::{LinkResolver, MarkdownRenderer};
use crate::pages::{Asset, Page, discover_assets, discover_pages};
use crate::site::SiteConfig;

/// Outcome of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Output files written for content pages
    pub pages: Vec<PathBuf>,
    /// Code blocks rendered across all pages
    pub code_blocks: usize,
    /// Non-Markdown files copied from the content directory
    pub assets: Vec<PathBuf>,
    /// Fallback page written, or None if a content page already provides it
    pub fallback: Option<PathBuf>,
}

/// Builds the site described by `config`.
///
/// Loads site metadata and the highlighter once, renders every Markdown
/// page in the content directory to the output directory (mirroring its
/// layout), copies every other content file next to the pages, and writes
/// the fallback page.
///
/// # Errors
///
/// Returns error if:
/// - Site metadata cannot be read or is invalid
/// - The highlight theme cannot be loaded
/// - A page cannot be read, rendered or written
/// - An asset cannot be copied
pub fn build_site(config: &Config) -> Result<BuildSummary> {
    let site = load_site(&config.site)?;
    site.validate().context("Invalid site metadata")?;

    let highlighter = Highlighter::new(config.languages.as_slice(), &config.theme)
        .with_context(|| format!("Failed to create syntax highlighter with theme: {}", config.theme))?;

    fs::create_dir_all(&config.output).with_context(|| {
        format!("Failed to create output directory: {}", config.output.display())
    })?;

    let pages = discover_pages(&config.content)?;
    tracing::info!(
        pages = pages.len(),
        content = %config.content.display(),
        "discovered pages"
    );

    let assets = discover_assets(&config.content)?;
    let mut copied = Vec::with_capacity(assets.len());
    for asset in &assets {
        copied.push(copy_asset(asset, config)?);
    }
    tracing::info!(assets = copied.len(), "copied assets");

    let mut written = Vec::with_capacity(pages.len());
    let mut code_blocks = 0;

    for page in &pages {
        let (path, blocks) = build_page(page, &site, &highlighter, config)
            .with_context(|| format!("Failed to build page: {}", page.relative().display()))?;
        written.push(path);
        code_blocks += blocks;
    }

    let fallback = write_fallback(&site, config, &pages, &assets)?;

    Ok(BuildSummary {
        pages: written,
        code_blocks,
        assets: copied,
        fallback,
    })
}

fn load_site(path: &Path) -> Result<SiteConfig> {
    if path.exists() {
        SiteConfig::load(path)
    } else {
        tracing::info!(path = %path.display(), "site config not found, using defaults");
        Ok(SiteConfig::default())
    }
}

/// Copies one asset to the same relative path under the output directory.
fn copy_asset(asset: &Asset, config: &Config) -> Result<PathBuf> {
    let target = config.output.join(asset.relative());
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::copy(asset.source(), &target).with_context(|| {
        format!(
            "Failed to copy asset {} to {}",
            asset.source().display(),
            target.display()
        )
    })?;

    tracing::debug!(asset = %target.display(), "copied asset");
    Ok(target)
}

/// Renders one page and writes it, returning output path and code block count.
fn build_page(
    page: &Page,
    site: &SiteConfig,
    highlighter: &Highlighter,
    config: &Config,
) -> Result<(PathBuf, usize)> {
    let resolver = LinkResolver::new(config.base.as_str(), page.relative());
    let renderer = MarkdownRenderer::with_link_resolver(highlighter, resolver);
    let rendered = renderer.render_file(page.source())?;

    let output_path = page.output_path();
    let site_path = page.site_path();
    let title = rendered.title.unwrap_or_else(|| page.fallback_title());

    let html = layout::page(
        &PageContext {
            site,
            base: &config.base,
            title: &title,
            path: &site_path,
            is_index: page.is_index(),
        },
        &rendered.html,
    );

    let target = config.output.join(&output_path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&target, html.into_string())
        .with_context(|| format!("Failed to write page to {}", target.display()))?;

    tracing::debug!(
        page = %target.display(),
        code_blocks = rendered.code_blocks,
        "generated page"
    );

    Ok((target, rendered.code_blocks))
}

fn write_fallback(
    site: &SiteConfig,
    config: &Config,
    pages: &[Page],
    assets: &[Asset],
) -> Result<Option<PathBuf>> {
    let fallback = Path::new(&config.fallback);
    let provided = pages.iter().any(|page| page.output_path() == fallback)
        || assets.iter().any(|asset| asset.relative() == fallback);
    if provided {
        tracing::debug!(fallback = %config.fallback, "fallback page provided by content");
        return Ok(None);
    }

    let target = config.output.join(&config.fallback);
    fs::write(&target, layout::not_found(site, &config.base).into_string())
        .with_context(|| format!("Failed to write fallback page to {}", target.display()))?;

    Ok(Some(target))
}
