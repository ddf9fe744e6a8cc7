//! Site configuration (config.toml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub base_url: String,
    /// Permalink pattern for blog entries, with :year/:month/:day/:slug
    /// placeholders
    pub permalink: String,

    // Directory
    pub content_dir: String,
    pub output_dir: String,
    pub static_dir: String,
    pub tag_dir: String,
    pub category_dir: String,

    // Writing
    pub build_drafts: bool,

    // Listing
    pub per_page: usize,
    pub feed_limit: usize,

    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Free-form values exposed to templates as `config.extra`
    #[serde(default)]
    pub extra: toml::Table,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "A personal site".to_string(),
            description: String::new(),
            author: "Anonymous".to_string(),
            language: "en".to_string(),

            base_url: "http://example.com".to_string(),
            permalink: "blog/:year/:month/:day/:slug/".to_string(),

            content_dir: "content".to_string(),
            output_dir: "public".to_string(),
            static_dir: "static".to_string(),
            tag_dir: "tags".to_string(),
            category_dir: "categories".to_string(),

            build_drafts: false,

            per_page: 10,
            feed_limit: 20,

            highlight: HighlightConfig::default(),
            extra: toml::Table::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Base URL without a trailing slash
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub enabled: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            enabled: true,
        }
    }
}
