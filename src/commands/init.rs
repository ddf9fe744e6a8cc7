//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

/// Scaffold a new site in the given directory
pub fn run(target_dir: &Path) -> Result<()> {
    if target_dir.join("config.toml").exists() {
        bail!("config.toml already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("content/blog"))?;
    fs::create_dir_all(target_dir.join("content/resume"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    let config_content = r#"# Site
title = "A personal site"
description = ""
author = "Anonymous"
language = "en"

# URL
base_url = "http://example.com"
permalink = "blog/:year/:month/:day/:slug/"

# Listing
per_page = 10
feed_limit = 20

[highlight]
theme = "base16-ocean.dark"
enabled = true

[extra]
"#;
    fs::write(target_dir.join("config.toml"), config_content)?;

    let resume_content = r#"+++
title = "Resume"
template = "resume.html"
+++

## Experience

Write your resume here.
"#;
    fs::write(target_dir.join("content/resume/index.md"), resume_content)?;

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_layout() {
        let dir = TempDir::new().unwrap();
        run(dir.path()).unwrap();

        assert!(dir.path().join("config.toml").exists());
        assert!(dir.path().join("content/blog").is_dir());
        assert!(dir.path().join("content/resume/index.md").exists());
        assert!(dir.path().join("static").is_dir());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = TempDir::new().unwrap();
        run(dir.path()).unwrap();
        assert!(run(dir.path()).is_err());
    }

    #[test]
    fn test_init_config_parses() {
        let dir = TempDir::new().unwrap();
        run(dir.path()).unwrap();
        let config = crate::config::SiteConfig::load(dir.path().join("config.toml")).unwrap();
        assert_eq!(config.per_page, 10);
    }
}
