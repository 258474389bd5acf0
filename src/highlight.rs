//! Code block highlighting with syntect.
//!
//! The grammar set and color theme are loaded once in [`Highlighter::new`]
//! and only read afterwards. Every code block renders to exactly one HTML
//! fragment; a language that was not loaded falls back to plain text.

use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::path::Path;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Language identifier used when the requested one is not supported.
pub const FALLBACK_LANGUAGE: &str = "text";

/// Languages loaded when none are configured.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "javascript",
    "html",
    "css",
    "bash",
    "json",
    "markdown",
    "rust",
];

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Alternate fence names accepted for a loaded language.
const ALIASES: &[(&str, &[&str])] = &[
    ("javascript", &["js", "mjs", "cjs"]),
    ("typescript", &["ts"]),
    ("bash", &["sh", "shell", "zsh"]),
    ("markdown", &["md"]),
    ("rust", &["rs"]),
    ("python", &["py"]),
    ("yaml", &["yml"]),
];

/// Immutable set of language identifiers with a loaded grammar.
///
/// Maps each identifier (configured name or alias) to the name of the
/// syntect grammar that tokenizes it. Always contains [`FALLBACK_LANGUAGE`].
#[derive(Debug, Clone)]
pub struct SupportedLanguages {
    grammars: BTreeMap<String, String>,
}

impl SupportedLanguages {
    /// Returns true if `language` is a member of the set. Lookup is exact.
    pub fn contains(&self, language: &str) -> bool {
        self.grammars.contains_key(language)
    }

    /// Resolves a requested language to the identifier used for rendering.
    ///
    /// An absent request is treated as the empty string. Members are
    /// returned verbatim, anything else resolves to [`FALLBACK_LANGUAGE`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use folio::Highlighter;
    ///
    /// let highlighter = Highlighter::new(&["javascript"], "base16-ocean.dark")?;
    /// let languages = highlighter.languages();
    /// assert_eq!(languages.resolve(Some("javascript")), "javascript");
    /// assert_eq!(languages.resolve(Some("brainfuck")), "text");
    /// assert_eq!(languages.resolve(None), "text");
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn resolve<'a>(&self, requested: Option<&'a str>) -> &'a str {
        let requested = requested.unwrap_or("");
        if self.contains(requested) {
            requested
        } else {
            FALLBACK_LANGUAGE
        }
    }

    /// Iterates over member identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.grammars.keys().map(String::as_str)
    }

    fn grammar(&self, language: &str) -> Option<&str> {
        self.grammars.get(language).map(String::as_str)
    }
}

/// Syntax highlighter over a fixed grammar set and a single theme.
///
/// Construct once before rendering and share by reference. Rendering takes
/// `&self` only, so the loaded grammars and theme never change after
/// construction.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
    languages: SupportedLanguages,
}

impl Highlighter {
    /// Loads grammars for `languages` and the named color theme.
    ///
    /// Languages without a bundled grammar are skipped with a warning and
    /// do not become members of the supported set. `theme` is either the
    /// name of a bundled syntect theme or a path to a `.tmTheme` file.
    ///
    /// # Errors
    ///
    /// Returns error if the theme cannot be found or loaded.
    pub fn new(languages: &[impl AsRef<str>], theme: &str) -> Result<Self> {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_data = load_theme(theme)?;

        let mut grammars = BTreeMap::new();
        grammars.insert(
            FALLBACK_LANGUAGE.to_string(),
            syntax_set.find_syntax_plain_text().name.clone(),
        );

        for language in languages {
            let language = language.as_ref().trim();
            if language.is_empty() || language == FALLBACK_LANGUAGE {
                continue;
            }

            let Some(syntax) = syntax_set.find_syntax_by_token(language) else {
                tracing::warn!(language, "no grammar available, rendering as plain text");
                continue;
            };

            grammars.insert(language.to_string(), syntax.name.clone());
            for alias in aliases_of(language) {
                grammars
                    .entry((*alias).to_string())
                    .or_insert_with(|| syntax.name.clone());
            }
        }

        let languages = SupportedLanguages { grammars };
        tracing::info!(
            theme,
            languages = ?languages.iter().collect::<Vec<_>>(),
            "loaded syntax highlighter"
        );

        Ok(Self {
            syntax_set,
            theme: theme_data,
            languages,
        })
    }

    /// Loads [`DEFAULT_LANGUAGES`] with [`DEFAULT_THEME`].
    ///
    /// # Errors
    ///
    /// Returns error if the bundled default theme is missing.
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_LANGUAGES, DEFAULT_THEME)
    }

    /// The supported language set.
    pub fn languages(&self) -> &SupportedLanguages {
        &self.languages
    }

    /// Renders one code block to a themed HTML fragment.
    ///
    /// The requested language is resolved against the supported set; an
    /// absent, empty or unknown language renders as escaped plain text
    /// without token spans. The fragment is a `<pre>` carrying the theme's
    /// background and foreground colors and a `data-language` attribute
    /// naming the resolved language.
    ///
    /// # Errors
    ///
    /// Returns error only if the highlighting engine fails on a line.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use folio::Highlighter;
    ///
    /// let highlighter = Highlighter::with_defaults()?;
    /// let html = highlighter.render_code_block("const x = 1;", Some("javascript"))?;
    /// assert!(html.contains("data-language=\"javascript\""));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn render_code_block(&self, source: &str, requested: Option<&str>) -> Result<String> {
        let language = self.languages.resolve(requested);
        let background = self.theme.settings.background.unwrap_or(Color::BLACK);
        let foreground = self.theme.settings.foreground.unwrap_or(Color::WHITE);

        let mut html = String::with_capacity(source.len() * 2 + 128);
        html.push_str("<pre class=\"highlight\" data-language=\"");
        html.push_str(&escape_html(language));
        html.push_str("\" style=\"background-color:");
        html.push_str(&css_color(background));
        html.push_str(";color:");
        html.push_str(&css_color(foreground));
        html.push_str(";\"><code>");

        if language == FALLBACK_LANGUAGE {
            html.push_str(&escape_html(source));
        } else {
            html.push_str(&self.highlight_lines(source, language, background)?);
        }

        html.push_str("</code></pre>\n");
        Ok(html)
    }

    fn highlight_lines(&self, source: &str, language: &str, background: Color) -> Result<String> {
        let syntax = self
            .languages
            .grammar(language)
            .and_then(|name| self.syntax_set.find_syntax_by_name(name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut html = String::with_capacity(source.len() * 4);

        for line in LinesWithEndings::from(source) {
            let regions = lines
                .highlight_line(line, &self.syntax_set)
                .with_context(|| format!("Failed to highlight {} source line", language))?;
            let styled =
                styled_line_to_highlighted_html(&regions[..], IncludeBackground::IfDifferent(background))
                    .context("Failed to render highlighted line")?;
            html.push_str(&styled);
        }

        Ok(html)
    }
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("languages", &self.languages)
            .finish_non_exhaustive()
    }
}

/// Loads a bundled theme by name, or a `.tmTheme` file by path.
fn load_theme(theme: &str) -> Result<Theme> {
    let mut bundled = ThemeSet::load_defaults();
    if let Some(found) = bundled.themes.remove(theme) {
        return Ok(found);
    }

    let path = Path::new(theme);
    if path.extension().is_some_and(|ext| ext == "tmTheme") {
        return ThemeSet::get_theme(path)
            .with_context(|| format!("Failed to load theme file: {}", path.display()));
    }

    let available: Vec<&str> = bundled.themes.keys().map(String::as_str).collect();
    bail!(
        "Unknown highlight theme: {} (available: {})",
        theme,
        available.join(", ")
    );
}

fn aliases_of(language: &str) -> &'static [&'static str] {
    ALIASES
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

fn css_color(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Escapes HTML special characters.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
