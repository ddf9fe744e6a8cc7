//! Content loader - loads blog entries and standalone pages from the content
//! directory

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Entry, FrontMatter, MarkdownRenderer, Page};
use crate::Folio;

/// Directory under the content root holding the chronological blog
pub const BLOG_DIR: &str = "blog";

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    site: &'a Folio,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Folio) -> Self {
        let renderer = MarkdownRenderer::new(&site.config.highlight);
        Self { site, renderer }
    }

    /// Load all blog entries from content/blog, sorted by date descending.
    /// The sort is stable, entries sharing a date keep file order.
    pub fn load_entries(&self) -> Result<Vec<Entry>> {
        let blog_dir = self.site.content_dir.join(BLOG_DIR);
        if !blog_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for dirent in WalkDir::new(&blog_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = dirent.path();
            if path.is_file() && is_markdown_file(path) {
                let entry = self
                    .load_entry(path)
                    .with_context(|| format!("Failed to load entry {:?}", path))?;
                if entry.draft && !self.site.config.build_drafts {
                    tracing::debug!("Skipping draft: {}", entry.source);
                    continue;
                }
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(entries)
    }

    /// Load a single blog entry from a file
    fn load_entry(&self, path: &Path) -> Result<Entry> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        // Title and date are required on blog entries
        let Some(title) = fm.title.clone() else {
            bail!("blog entry has no title");
        };
        if title.trim().is_empty() {
            bail!("blog entry has an empty title");
        }
        let Some(date) = fm.parse_date()? else {
            bail!("blog entry has no date");
        };
        let updated = fm.parse_updated()?;

        let source = self.relative_source(path);

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let permalink_path = self.entry_permalink(&date, &slug);
        let permalink = format!("{}{}", self.site.config.base_url_trimmed(), permalink_path);

        let content_html = self.renderer.render(body)?;

        let mut entry = Entry::new(title, date, source);
        entry.updated = updated;
        entry.raw = body.to_string();
        entry.content = content_html;
        entry.tags = fm.taxonomies.tags;
        entry.categories = fm.taxonomies.categories;
        entry.draft = fm.draft;
        entry.full_source = path.to_path_buf();
        entry.path = permalink_path;
        entry.permalink = permalink;
        entry.slug = slug;
        entry.extra = fm.extra;

        Ok(entry)
    }

    /// Load all standalone pages (markdown files outside content/blog),
    /// the resume among them
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();

        for dirent in WalkDir::new(content_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = dirent.path();

            let relative = path.strip_prefix(content_dir).unwrap_or(path);
            let first_component = relative
                .components()
                .next()
                .and_then(|c| c.as_os_str().to_str());
            if first_component == Some(BLOG_DIR) {
                continue;
            }

            if path.is_file() && is_markdown_file(path) {
                let page = self
                    .load_page(path)
                    .with_context(|| format!("Failed to load page {:?}", path))?;
                pages.push(page);
            }
        }

        Ok(pages)
    }

    /// Load a single page from a file
    fn load_page(&self, path: &Path) -> Result<Page> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let Some(title) = fm.title.clone() else {
            bail!("page has no title");
        };
        if title.trim().is_empty() {
            bail!("page has an empty title");
        }

        let source = self.relative_source(path);
        let page_path = page_url_path(&source);
        let permalink = format!("{}{}", self.site.config.base_url_trimmed(), page_path);

        let content_html = self.renderer.render(body)?;

        let mut page = Page::new(title, source);
        page.date = fm.parse_date()?;
        page.raw = body.to_string();
        page.content = content_html;
        page.template = fm.template;
        page.full_source = path.to_path_buf();
        page.path = page_path;
        page.permalink = permalink;
        page.extra = fm.extra;

        Ok(page)
    }

    fn relative_source(&self, path: &Path) -> String {
        path.strip_prefix(&self.site.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }

    /// Expand the configured permalink pattern for a blog entry
    fn entry_permalink(&self, date: &NaiveDate, slug: &str) -> String {
        let expanded = self
            .site
            .config
            .permalink
            .replace(":year", &format!("{:04}", date.year()))
            .replace(":month", &format!("{:02}", date.month()))
            .replace(":day", &format!("{:02}", date.day()))
            .replace(":slug", slug);

        format!("/{}", expanded.trim_start_matches('/'))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// URL path for a standalone page: the source path without extension, with
/// index files collapsing to their directory
fn page_url_path(source: &str) -> String {
    let without_ext = source.trim_end_matches(".md").trim_end_matches(".markdown");

    let path = if without_ext == "index" {
        String::new()
    } else if let Some(dir) = without_ext.strip_suffix("/index") {
        format!("{}/", dir)
    } else {
        format!("{}/", without_ext)
    };

    format!("/{}", path)
}
