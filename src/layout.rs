//! Page layout wrapper

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::site::SiteConfig;

/// Data container for wrapping one rendered page.
pub struct PageContext<'a> {
    pub site: &'a SiteConfig,
    /// Deployment base path, empty or starting with `/`
    pub base: &'a str,
    /// Page title without site suffix
    pub title: &'a str,
    /// Output path of the page relative to the site root, e.g. `blog/post.html`
    pub path: &'a str,
    pub is_index: bool,
}

impl PageContext<'_> {
    /// Document title shown in the browser tab.
    ///
    /// The landing page uses `"{name} - {title}"` from site metadata, every
    /// other page `"{page title} | {name}"`.
    pub fn document_title(&self) -> String {
        if self.is_index {
            format!("{} - {}", self.site.name, self.site.title)
        } else {
            format!("{} | {}", self.title, self.site.name)
        }
    }
}

/// Wraps a rendered page body in a complete HTML document.
///
/// Adds charset and viewport, description, OpenGraph tags and a canonical
/// link built from site metadata, plus the shared header and footer.
///
/// # Arguments
///
/// * `ctx`: Site and page metadata
/// * `body_html`: Rendered Markdown body, inserted without escaping
pub fn page(ctx: &PageContext<'_>, body_html: &str) -> Markup {
    let document_title = ctx.document_title();
    let canonical = if ctx.is_index {
        ctx.site.absolute_url(ctx.base, "")
    } else {
        ctx.site.absolute_url(ctx.base, ctx.path)
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (document_title) }
                meta name="description" content=(ctx.site.description);
                meta property="og:type" content="website";
                meta property="og:title" content=(document_title);
                meta property="og:description" content=(ctx.site.description);
                meta property="og:url" content=(canonical);
                meta property="og:image" content=(ctx.site.absolute_url(ctx.base, &ctx.site.og_image));
                link rel="canonical" href=(canonical);
            }
            body {
                (header(ctx.site, ctx.base))
                main class="content" {
                    (PreEscaped(body_html))
                }
                (footer(ctx.site))
            }
        }
    }
}

/// Fallback page served for unknown paths.
pub fn not_found(site: &SiteConfig, base: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { "Page not found | " (site.name) }
            }
            body {
                (header(site, base))
                main class="content not-found" {
                    h1 { "Page not found" }
                    p { "The page you are looking for does not exist or has moved." }
                    p { a href=(format!("{}/", base)) { "Back to the home page" } }
                }
                (footer(site))
            }
        }
    }
}

fn header(site: &SiteConfig, base: &str) -> Markup {
    html! {
        header class="site-header" {
            a class="site-name" href=(format!("{}/", base)) { (site.name) }
            span class="site-title" { (site.title) }
        }
    }
}

fn footer(site: &SiteConfig) -> Markup {
    let social = site.social_links();

    html! {
        footer class="site-footer" {
            @if site.available {
                p class="availability" { "Available for new projects" }
            }
            @if !site.email.is_empty() {
                a class="email" href=(format!("mailto:{}", site.email)) { (site.email) }
            }
            @if !social.is_empty() {
                nav class="social" {
                    @for (label, url) in &social {
                        a href=(url) rel="me noopener" { (label) }
                    }
                }
            }
        }
    }
}
