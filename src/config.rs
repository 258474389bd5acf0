//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::highlight::{DEFAULT_LANGUAGES, DEFAULT_THEME};

/// Command line configuration for folio.
#[derive(Debug, Clone, Parser)]
#[command(name = "folio", version, about, long_about = None)]
pub struct Config {
    /// Directory of Markdown pages
    #[arg(default_value = "content")]
    pub content: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "build")]
    pub output: PathBuf,

    /// Site metadata file (TOML)
    #[arg(long, default_value = "site.toml")]
    pub site: PathBuf,

    /// Syntax highlighting theme (bundled name or path to a .tmTheme file)
    #[arg(long, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Languages to load grammars for (repeatable or comma separated)
    #[arg(long = "lang", value_delimiter = ',', default_values_t = DEFAULT_LANGUAGES.iter().map(|l| l.to_string()))]
    pub languages: Vec<String>,

    /// URL path prefix the site is deployed under, e.g. /portfolio
    #[arg(long, default_value = "")]
    pub base: String,

    /// File name of the fallback page for unknown paths
    #[arg(long, default_value = "404.html")]
    pub fallback: String,

    /// Open the generated site in a browser
    #[arg(long)]
    pub open: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Content path is not a directory
    /// - Base path is neither empty nor of the form `/segment` without a
    ///   trailing slash
    /// - Fallback is not a plain `.html` file name
    pub fn validate(&self) -> Result<()> {
        if !self.content.is_dir() {
            bail!("Content directory does not exist: {}", self.content.display());
        }

        if !self.base.is_empty() && (!self.base.starts_with('/') || self.base.ends_with('/')) {
            bail!(
                "Base path must be empty or start with '/' and not end with '/': {}",
                self.base
            );
        }

        let fallback = Path::new(&self.fallback);
        if fallback.components().count() != 1 || fallback.extension().is_none_or(|ext| ext != "html")
        {
            bail!("Fallback must be an .html file name: {}", self.fallback);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            content: PathBuf::from("."),
            output: PathBuf::from("build"),
            site: PathBuf::from("site.toml"),
            theme: DEFAULT_THEME.to_string(),
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            base: String::new(),
            fallback: "404.html".to_string(),
            open: false,
            verbose: false,
        }
    }

    #[test]
    fn test_parse_defaults() {
        // Arrange & Act
        let config = Config::try_parse_from(["folio"]).expect("Should parse");

        // Assert
        assert_eq!(config.content, PathBuf::from("content"));
        assert_eq!(config.output, PathBuf::from("build"));
        assert_eq!(config.site, PathBuf::from("site.toml"));
        assert_eq!(config.theme, DEFAULT_THEME);
        assert_eq!(config.languages, DEFAULT_LANGUAGES);
        assert_eq!(config.base, "");
        assert_eq!(config.fallback, "404.html");
        assert!(!config.open);
    }

    #[test]
    fn test_parse_languages_comma_and_repeat() {
        // Arrange & Act
        let config = Config::try_parse_from(["folio", "--lang", "rust,python", "--lang", "bash"])
            .expect("Should parse");

        // Assert
        assert_eq!(config.languages, vec!["rust", "python", "bash"]);
    }

    #[test]
    fn test_parse_all_options() {
        // Arrange & Act
        let config = Config::try_parse_from([
            "folio",
            "pages",
            "-o",
            "public",
            "--site",
            "meta.toml",
            "--theme",
            "InspiredGitHub",
            "--base",
            "/portfolio",
            "--fallback",
            "missing.html",
            "--open",
            "-v",
        ])
        .expect("Should parse");

        // Assert
        assert_eq!(config.content, PathBuf::from("pages"));
        assert_eq!(config.output, PathBuf::from("public"));
        assert_eq!(config.site, PathBuf::from("meta.toml"));
        assert_eq!(config.theme, "InspiredGitHub");
        assert_eq!(config.base, "/portfolio");
        assert_eq!(config.fallback, "missing.html");
        assert!(config.open);
        assert!(config.verbose);
    }

    #[test]
    fn test_validate_existing_path() {
        // Arrange
        let config = config();

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_ok(), "Current directory should be valid");
    }

    #[test]
    fn test_validate_missing_content() {
        // Arrange
        let config = Config {
            content: PathBuf::from("definitely/not/here"),
            ..config()
        };

        // Act & Assert
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_base_path() {
        for (base, ok) in [
            ("", true),
            ("/portfolio", true),
            ("/a/b", true),
            ("portfolio", false),
            ("/portfolio/", false),
            ("/", false),
        ] {
            // Arrange
            let config = Config {
                base: base.to_string(),
                ..config()
            };

            // Act
            let result = config.validate();

            // Assert
            assert_eq!(result.is_ok(), ok, "Unexpected validation for base {:?}", base);
        }
    }

    #[test]
    fn test_validate_fallback() {
        for (fallback, ok) in [
            ("404.html", true),
            ("missing.html", true),
            ("404.htm", false),
            ("errors/404.html", false),
            ("", false),
        ] {
            // Arrange
            let config = Config {
                fallback: fallback.to_string(),
                ..config()
            };

            // Act
            let result = config.validate();

            // Assert
            assert_eq!(result.is_ok(), ok, "Unexpected validation for fallback {:?}", fallback);
        }
    }
}
