//! Markdown rendering with GitHub Flavored Markdown support.

use anyhow::{Context, Result};
use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use comrak::{Arena, Options, format_html, parse_document};
use std::path::Path;

use super::LinkResolver;
use crate::highlight::Highlighter;

/// Markdown page rendered to an HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Body HTML, without document wrapper
    pub html: String,
    /// Text of the first level one heading
    pub title: Option<String>,
    /// Number of code blocks replaced with highlighted fragments
    pub code_blocks: usize,
}

/// Renders markdown to HTML with GitHub Flavored Markdown extensions.
///
/// Provides GFM extensions including tables, strikethrough, autolinks,
/// task lists, footnotes, and description lists. Every code block, fenced
/// or indented, is replaced with the fragment produced by the shared
/// [`Highlighter`]. Optionally resolves links between pages when
/// configured with a [`LinkResolver`].
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
    highlighter: &'a Highlighter,
    link_resolver: Option<LinkResolver>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    ///
    /// Configures all GFM extensions:
    /// - Tables, strikethrough, autolinks, task lists, footnotes
    /// - Heading ids for in page anchors
    /// - Smart punctuation for quotes and dashes
    /// - Raw HTML passes through (content is authored by the site owner)
    pub fn new(highlighter: &'a Highlighter) -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.extension.description_lists = true;
        options.extension.header_ids = Some(String::new());

        options.parse.smart = true;

        // Highlighted fragments are emitted as raw HTML blocks
        options.render.unsafe_ = true;

        Self {
            options,
            highlighter,
            link_resolver: None,
        }
    }

    /// Creates renderer that rewrites links between pages.
    ///
    /// Relative links (./about.md, ../index.md) are transformed to the
    /// generated page URLs under the resolver's base path. Absolute URLs
    /// and anchor links remain unchanged.
    pub fn with_link_resolver(highlighter: &'a Highlighter, resolver: LinkResolver) -> Self {
        let mut renderer = Self::new(highlighter);
        renderer.link_resolver = Some(resolver);
        renderer
    }

    /// Renders markdown content to an HTML string.
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting fails
    pub fn render(&self, content: &str) -> Result<String> {
        self.render_page(content).map(|page| page.html)
    }

    /// Renders markdown content, collecting page title and code block count.
    ///
    /// Parses markdown into an AST, replaces each code block node with a
    /// highlighted HTML block, rewrites link and image targets if a
    /// resolver is configured, then formats the tree as HTML. Targets in
    /// authored raw HTML (`<a href>`, `<img src>`) are rewritten too.
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting or HTML formatting fails
    pub fn render_page(&self, content: &str) -> Result<RenderedPage> {
        let arena = Arena::new();
        let root = parse_document(&arena, content, &self.options);

        let mut title = None;
        let mut code_blocks = 0;

        for node in root.descendants() {
            if title.is_none() && is_title_heading(node) {
                title = Some(collect_text(node));
                continue;
            }

            let mut ast = node.data.borrow_mut();

            let fragment = match &ast.value {
                NodeValue::CodeBlock(block) => Some(
                    self.highlighter
                        .render_code_block(&block.literal, fence_language(&block.info))
                        .with_context(|| {
                            format!("Failed to highlight code block at line {}", ast.sourcepos.start.line)
                        })?,
                ),
                _ => None,
            };

            if let Some(literal) = fragment {
                ast.value = NodeValue::HtmlBlock(NodeHtmlBlock {
                    block_type: 0,
                    literal,
                });
                code_blocks += 1;
                continue;
            }

            if let Some(resolver) = &self.link_resolver {
                match &mut ast.value {
                    NodeValue::Link(link) => link.url = rewrite(resolver, &link.url, false),
                    NodeValue::Image(link) => link.url = rewrite(resolver, &link.url, true),
                    NodeValue::HtmlInline(raw) => *raw = rewrite_html_links(raw, resolver),
                    NodeValue::HtmlBlock(block) => {
                        block.literal = rewrite_html_links(&block.literal, resolver)
                    }
                    _ => {}
                }
            }
        }

        let mut html = Vec::with_capacity(content.len() * 2);
        format_html(root, &self.options, &mut html).context("Failed to format HTML")?;
        let html = String::from_utf8(html).context("Rendered HTML is not valid UTF8")?;

        Ok(RenderedPage {
            html,
            title,
            code_blocks,
        })
    }

    /// Renders markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or rendering fails
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<RenderedPage> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        self.render_page(&content)
    }
}

/// First token of a fence info string, if any (`js title="app.js"` gives `js`).
fn fence_language(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}

fn is_title_heading<'a>(node: &'a AstNode<'a>) -> bool {
    matches!(&node.data.borrow().value, NodeValue::Heading(heading) if heading.level == 1)
}

/// Concatenates the text content below `node`.
fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.descendants() {
        match &child.data.borrow().value {
            NodeValue::Text(literal) => text.push_str(literal),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

/// Resolves a link target, keeping the original on failure.
fn rewrite(resolver: &LinkResolver, url: &str, is_image: bool) -> String {
    resolver.resolve(url, is_image).unwrap_or_else(|e| {
        tracing::warn!(url, "keeping unresolved link: {:#}", e);
        url.to_string()
    })
}

/// Rewrites `href` of `<a>` and `src` of `<img>` tags in raw HTML.
fn rewrite_html_links(html: &str, resolver: &LinkResolver) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;

    while let Some((start, is_image)) = next_link_tag(rest) {
        let len = rest[start..].find('>').map_or(rest.len() - start, |end| end + 1);
        result.push_str(&rest[..start]);
        result.push_str(&rewrite_tag(&rest[start..start + len], is_image, resolver));
        rest = &rest[start + len..];
    }

    result.push_str(rest);
    result
}

/// Offset of the next `<a ` or `<img ` tag and whether it is an image.
fn next_link_tag(html: &str) -> Option<(usize, bool)> {
    match (html.find("<a "), html.find("<img ")) {
        (Some(link), Some(image)) if image < link => Some((image, true)),
        (Some(link), _) => Some((link, false)),
        (None, Some(image)) => Some((image, true)),
        (None, None) => None,
    }
}

fn rewrite_tag(tag: &str, is_image: bool, resolver: &LinkResolver) -> String {
    let attr = if is_image { "src=\"" } else { "href=\"" };
    let value_start = tag
        .match_indices(attr)
        .map(|(pos, _)| pos)
        .find(|&pos| tag[..pos].ends_with(char::is_whitespace))
        .map(|pos| pos + attr.len());

    let Some(start) = value_start else {
        return tag.to_string();
    };
    let Some(len) = tag[start..].find('"') else {
        return tag.to_string();
    };

    let url = &tag[start..start + len];
    format!(
        "{}{}{}",
        &tag[..start],
        rewrite(resolver, url, is_image),
        &tag[start + len..]
    )
}
