//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! This module provides markdown rendering using comrak with GFM extensions
//! (tables, strikethrough, autolinks, task lists), syntect highlighting for
//! every code block, and link resolution between content pages.

mod links;
mod renderer;

pub use links::LinkResolver;
pub use renderer::{MarkdownRenderer, RenderedPage};
