//! folio: a small static site generator for a personal site
//!
//! A site is a directory of flat Markdown files with TOML front matter:
//! a chronological blog under `content/blog/` and standalone pages such as
//! the resume under other content directories. `folio build` reads the whole
//! corpus in one pass and writes plain HTML, a feed, and a search index.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application: configuration plus the resolved site directories
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory (holds config.toml)
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Folio {
    /// Create an instance from a site directory, loading config.toml if
    /// present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("config.toml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an already-built configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            base_dir,
            content_dir,
            output_dir,
        }
    }

    /// Generate the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Validate the content corpus
    pub fn check(&self) -> Result<()> {
        commands::check::run(self)
    }

    /// Remove the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
