//! Site metadata loaded from `site.toml`.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

/// Site metadata shown on every page and in OpenGraph tags.
///
/// Every field has a default, so an empty or partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Owner name, used as the site name
    pub name: String,
    /// Short role or tagline
    pub title: String,
    pub description: String,
    pub email: String,
    /// Canonical origin the site is deployed to, without base path
    pub url: String,
    /// Site rooted path of the OpenGraph preview image
    pub og_image: String,
    pub social: SocialLinks,
    /// Whether the owner is open to new work
    pub available: bool,
}

/// Profile links for social networks. Unset networks are not shown.
///
/// Without a `[social]` table every network gets a placeholder profile;
/// inside the table, networks that are left out stay unset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            title: "Full-Stack Developer".to_string(),
            description:
                "I build modern web applications with clean code and great user experiences."
                    .to_string(),
            email: "hello@example.com".to_string(),
            url: "https://echoloquate.github.io".to_string(),
            og_image: "/og-image.png".to_string(),
            social: SocialLinks::default(),
            available: true,
        }
    }
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            github: Some("https://github.com/yourusername".to_string()),
            linkedin: Some("https://linkedin.com/in/yourusername".to_string()),
            twitter: Some("https://twitter.com/yourusername".to_string()),
        }
    }
}

impl SiteConfig {
    /// Reads site metadata from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not valid site TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read site config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid site config: {}", path.display()))
    }

    /// Parses site metadata from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error on malformed TOML, wrong value types or unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse site TOML")
    }

    /// Validates metadata used to build absolute URLs and contact links.
    ///
    /// # Errors
    ///
    /// Returns error if `url` is not an http(s) origin or `email` has no `@`.
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            bail!("Site url must start with http:// or https://: {}", self.url);
        }
        if !self.email.is_empty() && !self.email.contains('@') {
            bail!("Site email is not an address: {}", self.email);
        }
        Ok(())
    }

    /// Joins the site origin, base path and a site rooted path.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use folio::SiteConfig;
    ///
    /// let site = SiteConfig::default();
    /// assert_eq!(
    ///     site.absolute_url("/blog", "/og-image.png"),
    ///     "https://echoloquate.github.io/blog/og-image.png"
    /// );
    /// ```
    pub fn absolute_url(&self, base: &str, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.url.trim_end_matches('/'),
            base,
            path.trim_start_matches('/')
        )
    }

    /// Configured social profiles as `(label, url)` pairs.
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub", &self.social.github),
            ("LinkedIn", &self.social.linkedin),
            ("Twitter", &self.social.twitter),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|url| (label, url)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        // Arrange
        let content = r#"
name = "Ada"
title = "Systems Engineer"
description = "Compilers and storage engines."
email = "ada@example.com"
url = "https://ada.example.com"
og_image = "/card.png"
available = false

[social]
github = "https://github.com/ada"
twitter = "https://twitter.com/ada"
"#;

        // Act
        let site = SiteConfig::from_toml_str(content).expect("Should parse");

        // Assert
        assert_eq!(site.name, "Ada");
        assert_eq!(site.title, "Systems Engineer");
        assert_eq!(site.og_image, "/card.png");
        assert!(!site.available);
        assert_eq!(site.social.github.as_deref(), Some("https://github.com/ada"));
        assert_eq!(site.social.linkedin, None);
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        // Arrange
        let content = "name = \"Ada\"\n";

        // Act
        let site = SiteConfig::from_toml_str(content).expect("Should parse");

        // Assert
        assert_eq!(site.name, "Ada");
        assert_eq!(site.title, SiteConfig::default().title);
        assert!(site.available);
    }

    #[test]
    fn test_parse_empty_config() {
        // Arrange & Act
        let site = SiteConfig::from_toml_str("").expect("Should parse");

        // Assert
        assert_eq!(site, SiteConfig::default());
    }

    #[test]
    fn test_default_social_links_are_placeholders() {
        // Arrange & Act
        let site = SiteConfig::from_toml_str("name = \"Ada\"\n").expect("Should parse");

        // Assert
        assert_eq!(site.url, "https://echoloquate.github.io");
        assert_eq!(
            site.social_links(),
            vec![
                ("GitHub", "https://github.com/yourusername"),
                ("LinkedIn", "https://linkedin.com/in/yourusername"),
                ("Twitter", "https://twitter.com/yourusername"),
            ]
        );
    }

    #[test]
    fn test_empty_social_table_clears_links() {
        // Arrange & Act
        let site = SiteConfig::from_toml_str("[social]\n").expect("Should parse");

        // Assert
        assert!(site.social_links().is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        // Arrange
        let content = "nmae = \"typo\"\n";

        // Act
        let result = SiteConfig::from_toml_str(content);

        // Assert
        assert!(result.is_err(), "Unknown keys should be rejected");
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        // Arrange
        let content = "available = \"yes\"\n";

        // Act
        let result = SiteConfig::from_toml_str(content);

        // Assert
        assert!(result.is_err(), "Wrong value type should be rejected");
    }

    #[test]
    fn test_validate_default() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        // Arrange
        let site = SiteConfig {
            url: "example.com".to_string(),
            ..SiteConfig::default()
        };

        // Act
        let result = site.validate();

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        // Arrange
        let site = SiteConfig {
            email: "not-an-address".to_string(),
            ..SiteConfig::default()
        };

        // Act & Assert
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_absolute_url() {
        // Arrange
        let site = SiteConfig {
            url: "https://ada.example.com/".to_string(),
            ..SiteConfig::default()
        };

        // Act & Assert
        assert_eq!(
            site.absolute_url("", "/og-image.png"),
            "https://ada.example.com/og-image.png"
        );
        assert_eq!(
            site.absolute_url("/portfolio", "about.html"),
            "https://ada.example.com/portfolio/about.html"
        );
        assert_eq!(site.absolute_url("", ""), "https://ada.example.com/");
    }

    #[test]
    fn test_social_links_skip_unset() {
        // Arrange
        let site = SiteConfig {
            social: SocialLinks {
                github: Some("https://github.com/ada".to_string()),
                linkedin: None,
                twitter: Some("https://twitter.com/ada".to_string()),
            },
            ..SiteConfig::default()
        };

        // Act
        let links = site.social_links();

        // Assert
        assert_eq!(
            links,
            vec![
                ("GitHub", "https://github.com/ada"),
                ("Twitter", "https://twitter.com/ada"),
            ]
        );
    }
}
