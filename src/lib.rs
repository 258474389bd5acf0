//! Static portfolio site builder.
//!
//! Markdown pages become HTML documents; every code block is highlighted
//! with a fixed theme and falls back to plain text for languages whose
//! grammar was not loaded.

mod build;
mod config;
mod highlight;
pub mod layout;
mod markdown;
mod pages;
mod site;

pub use build::{BuildSummary, build_site};
pub use config::Config;
pub use highlight::{
    DEFAULT_LANGUAGES, DEFAULT_THEME, FALLBACK_LANGUAGE, Highlighter, SupportedLanguages,
};
pub use markdown::{LinkResolver, MarkdownRenderer, RenderedPage};
pub use pages::{Asset, Page, discover_assets, discover_pages};
pub use site::{SiteConfig, SocialLinks};
