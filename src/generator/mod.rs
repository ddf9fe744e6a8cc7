//! Generator module - one-shot, single-pass build of the static site

use anyhow::{bail, Context as _, Result};
use chrono::Datelike;
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{taxonomy, Entry, Page};
use crate::helpers::{escape_xml, format_iso, strip_html, strip_invalid_xml_chars};
use crate::templates::{
    ConfigData, EntryData, NavEntry, PageData, PaginationData, TemplateRenderer, TermData,
    STYLESHEET,
};
use crate::Folio;

/// Static site generator using the embedded Tera theme
pub struct Generator {
    site: Folio,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, entries: &[Entry], pages: &[Page]) -> Result<()> {
        fs::create_dir_all(&self.site.output_dir)?;

        self.write_output("style.css", STYLESHEET)?;
        self.copy_static_assets()?;

        let config_data = self.build_config_data();

        self.generate_index_pages(entries, &config_data)?;
        self.generate_entry_pages(entries, &config_data)?;
        self.generate_page_pages(pages, &config_data)?;
        self.generate_taxonomy_pages(entries, &config_data)?;
        self.generate_atom_feed(entries)?;
        self.generate_search_index(entries)?;

        Ok(())
    }

    /// Build config data for templates
    fn build_config_data(&self) -> ConfigData {
        let config = &self.site.config;
        ConfigData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            base_url: config.base_url_trimmed().to_string(),
            tag_dir: config.tag_dir.clone(),
            category_dir: config.category_dir.clone(),
            extra: config.extra.clone(),
        }
    }

    /// Create a context with the variables every template expects
    fn base_context(&self, config_data: &ConfigData) -> Context {
        let mut context = Context::new();
        context.insert("config", config_data);
        context.insert(
            "current_year",
            &chrono::Utc::now().year().to_string(),
        );
        context
    }

    /// Generate paginated chronological index pages
    fn generate_index_pages(&self, entries: &[Entry], config_data: &ConfigData) -> Result<()> {
        let per_page = self.site.config.per_page.max(1);
        let total_pages = entries.len().div_ceil(per_page).max(1);

        for page_num in 1..=total_pages {
            let start = (page_num - 1) * per_page;
            let end = (start + per_page).min(entries.len());
            let page_entries: Vec<EntryData> =
                entries[start..end].iter().map(entry_data).collect();

            let pagination = PaginationData {
                per_page,
                total: total_pages,
                current: page_num,
                prev_link: match page_num {
                    1 => String::new(),
                    2 => "/".to_string(),
                    n => format!("/page/{}/", n - 1),
                },
                next_link: if page_num < total_pages {
                    format!("/page/{}/", page_num + 1)
                } else {
                    String::new()
                },
            };

            let mut context = self.base_context(config_data);
            context.insert("page_entries", &page_entries);
            context.insert("pagination", &pagination);

            let html = self.renderer.render("index.html", &context)?;

            let rel = if page_num == 1 {
                "index.html".to_string()
            } else {
                format!("page/{}/index.html", page_num)
            };
            self.write_output(&rel, &html)?;
        }

        tracing::info!("Generated {} index page(s)", total_pages);
        Ok(())
    }

    /// Generate one page per blog entry, with newer/older navigation
    fn generate_entry_pages(&self, entries: &[Entry], config_data: &ConfigData) -> Result<()> {
        for (i, entry) in entries.iter().enumerate() {
            // Entries are date-descending, so the previous index is newer
            let newer = i.checked_sub(1).map(|n| NavEntry {
                title: entries[n].title.clone(),
                path: entries[n].path.clone(),
            });
            let older = entries.get(i + 1).map(|e| NavEntry {
                title: e.title.clone(),
                path: e.path.clone(),
            });

            let mut context = self.base_context(config_data);
            context.insert("entry", &entry_data(entry));
            // Absent variables error inside {% if %}, a null is just falsy
            context.insert("newer", &newer);
            context.insert("older", &older);

            let html = self.renderer.render("entry.html", &context)?;

            let rel = format!("{}index.html", entry.path.trim_start_matches('/'));
            self.write_output(&rel, &html)?;
            tracing::debug!("Generated entry: {}", entry.path);
        }

        tracing::info!("Generated {} entry page(s)", entries.len());
        Ok(())
    }

    /// Generate standalone pages; the front-matter `template` key selects
    /// the Tera template (the resume uses resume.html)
    fn generate_page_pages(&self, pages: &[Page], config_data: &ConfigData) -> Result<()> {
        for page in pages {
            let template_name = page.template.as_deref().unwrap_or("page.html");
            if !self.renderer.has_template(template_name) {
                bail!(
                    "page {} names unknown template {:?}",
                    page.source,
                    template_name
                );
            }

            let mut context = self.base_context(config_data);
            context.insert("page", &page_data(page));

            let html = self.renderer.render(template_name, &context)?;

            let rel = format!("{}index.html", page.path.trim_start_matches('/'));
            self.write_output(&rel, &html)?;
            tracing::debug!("Generated page: {}", page.path);
        }

        tracing::info!("Generated {} standalone page(s)", pages.len());
        Ok(())
    }

    /// Generate term pages and listing pages for both taxonomies
    fn generate_taxonomy_pages(&self, entries: &[Entry], config_data: &ConfigData) -> Result<()> {
        let config = &self.site.config;
        let groups = [
            ("Tags", taxonomy::tags(entries, &config.tag_dir), &config.tag_dir),
            (
                "Categories",
                taxonomy::categories(entries, &config.category_dir),
                &config.category_dir,
            ),
        ];

        for (kind, terms, dir) in groups {
            let term_data: Vec<TermData> = terms
                .iter()
                .map(|t| TermData {
                    name: t.name.clone(),
                    path: t.path.clone(),
                    count: t.count(),
                    entries: t.entries.iter().map(|e| entry_data(e)).collect(),
                })
                .collect();

            for term in &term_data {
                let mut context = self.base_context(config_data);
                context.insert("term", term);

                let html = self.renderer.render("term.html", &context)?;
                let rel = format!("{}index.html", term.path.trim_start_matches('/'));
                self.write_output(&rel, &html)?;
            }

            let mut context = self.base_context(config_data);
            context.insert("kind", kind);
            context.insert("terms", &term_data);

            let html = self.renderer.render("terms.html", &context)?;
            self.write_output(&format!("{}/index.html", dir), &html)?;

            tracing::info!("Generated {} {} page(s)", term_data.len(), kind.to_lowercase());
        }

        Ok(())
    }

    /// Generate the Atom feed of the most recent entries
    fn generate_atom_feed(&self, entries: &[Entry]) -> Result<()> {
        let config = &self.site.config;
        let base_url = config.base_url_trimmed();

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}/atom.xml\" rel=\"self\"/>\n",
            base_url
        ));
        feed.push_str(&format!("  <link href=\"{}/\"/>\n", base_url));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            chrono::Utc::now().to_rfc3339()
        ));
        feed.push_str(&format!("  <id>{}/</id>\n", base_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for entry in entries.iter().take(config.feed_limit) {
            feed.push_str("  <entry>\n");
            feed.push_str(&format!(
                "    <title>{}</title>\n",
                escape_xml(&entry.title)
            ));
            feed.push_str(&format!(
                "    <link href=\"{}{}\"/>\n",
                base_url, entry.path
            ));
            feed.push_str(&format!("    <id>{}{}</id>\n", base_url, entry.path));
            feed.push_str(&format!(
                "    <published>{}T00:00:00Z</published>\n",
                format_iso(&entry.date)
            ));
            feed.push_str(&format!(
                "    <updated>{}T00:00:00Z</updated>\n",
                format_iso(&entry.updated.unwrap_or(entry.date))
            ));
            let content = strip_invalid_xml_chars(&entry.content);
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                content
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        self.write_output("atom.xml", &feed)?;
        tracing::info!("Generated atom.xml");
        Ok(())
    }

    /// Generate the JSON search index
    fn generate_search_index(&self, entries: &[Entry]) -> Result<()> {
        let search_data: Vec<serde_json::Value> = entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "title": e.title,
                    "url": e.path,
                    "content": strip_html(&e.content),
                    "date": format_iso(&e.date),
                    "tags": e.tags,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&search_data)?;
        self.write_output("search.json", &json)?;
        tracing::info!("Generated search.json");
        Ok(())
    }

    /// Copy the static directory and any non-markdown files alongside
    /// content into the output directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = self.site.base_dir.join(&self.site.config.static_dir);
        if static_dir.exists() {
            self.copy_tree(&static_dir, |_| true)?;
        }
        if self.site.content_dir.exists() {
            self.copy_tree(&self.site.content_dir, |path| !is_markdown(path))?;
        }
        Ok(())
    }

    fn copy_tree<F>(&self, root: &Path, keep: F) -> Result<()>
    where
        F: Fn(&Path) -> bool,
    {
        for dirent in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = dirent.path();
            if path.is_file() && keep(path) {
                let relative = path.strip_prefix(root)?;
                let dest = self.site.output_dir.join(relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
            }
        }
        Ok(())
    }

    fn write_output(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.site.output_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        Ok(())
    }
}

fn entry_data(entry: &Entry) -> EntryData {
    EntryData {
        title: entry.title.clone(),
        date: format_iso(&entry.date),
        path: entry.path.clone(),
        permalink: entry.permalink.clone(),
        tags: entry.tags.clone(),
        categories: entry.categories.clone(),
        content: entry.content.clone(),
    }
}

fn page_data(page: &Page) -> PageData {
    PageData {
        title: page.title.clone(),
        date: page.date.as_ref().map(format_iso),
        path: page.path.clone(),
        permalink: page.permalink.clone(),
        content: page.content.clone(),
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::ContentLoader;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn build_site(dir: &TempDir) -> Folio {
        let site = Folio::with_config(dir.path(), SiteConfig::default());
        let loader = ContentLoader::new(&site);
        let entries = loader.load_entries().unwrap();
        let pages = loader.load_pages().unwrap();
        Generator::new(&site).unwrap().generate(&entries, &pages).unwrap();
        site
    }

    #[test]
    fn test_generate_full_site() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "content/blog/first.md",
            "+++\ntitle = \"First\"\ndate = 2022-04-25\n\n[taxonomies]\ncategories = [\"programming\"]\ntags = [\"rust\"]\n+++\nHello *world*.",
        );
        write(
            dir.path(),
            "content/resume/index.md",
            "+++\ntitle = \"Resume\"\ntemplate = \"resume.html\"\n+++\nMy experience.",
        );

        let site = build_site(&dir);
        let out = &site.output_dir;

        assert!(out.join("index.html").exists());
        assert!(out.join("blog/2022/04/25/first/index.html").exists());
        assert!(out.join("resume/index.html").exists());
        assert!(out.join("tags/rust/index.html").exists());
        assert!(out.join("tags/index.html").exists());
        assert!(out.join("categories/programming/index.html").exists());
        assert!(out.join("atom.xml").exists());
        assert!(out.join("search.json").exists());
        assert!(out.join("style.css").exists());

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("First"));

        let resume = fs::read_to_string(out.join("resume/index.html")).unwrap();
        assert!(resume.contains("My experience."));
        assert!(resume.contains("class=\"resume\""));
    }

    #[test]
    fn test_index_pagination() {
        let dir = TempDir::new().unwrap();
        for i in 1..=12 {
            write(
                dir.path(),
                &format!("content/blog/post-{:02}.md", i),
                &format!("+++\ntitle = \"Post {}\"\ndate = 2024-01-{:02}\n+++\n.", i, i),
            );
        }

        let site = build_site(&dir);
        assert!(site.output_dir.join("index.html").exists());
        assert!(site.output_dir.join("page/2/index.html").exists());

        let page2 = fs::read_to_string(site.output_dir.join("page/2/index.html")).unwrap();
        assert!(page2.contains("Page 2 of 2"));
        // Oldest entries fall to the last page
        assert!(page2.contains("Post 1"));
    }

    #[test]
    fn test_unknown_template_fails() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "content/about.md",
            "+++\ntitle = \"About\"\ntemplate = \"nope.html\"\n+++\n.",
        );

        let site = Folio::with_config(dir.path(), SiteConfig::default());
        let loader = ContentLoader::new(&site);
        let pages = loader.load_pages().unwrap();
        let result = Generator::new(&site).unwrap().generate(&[], &pages);
        assert!(result.is_err());
    }

    #[test]
    fn test_feed_lists_newest_entries() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "content/blog/a.md",
            "+++\ntitle = \"Tags & refs\"\ndate = 2023-02-01\n+++\n.",
        );

        let site = build_site(&dir);
        let feed = fs::read_to_string(site.output_dir.join("atom.xml")).unwrap();
        assert!(feed.contains("<published>2023-02-01T00:00:00Z</published>"));
        assert!(feed.contains("Tags &amp; refs"));
    }

    #[test]
    fn test_static_assets_copied() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "static/robots.txt", "User-agent: *\n");
        write(
            dir.path(),
            "content/blog/post.md",
            "+++\ntitle = \"P\"\ndate = 2024-01-01\n+++\n.",
        );
        write(dir.path(), "content/blog/diagram.svg", "<svg></svg>");

        let site = build_site(&dir);
        assert!(site.output_dir.join("robots.txt").exists());
        assert!(site.output_dir.join("blog/diagram.svg").exists());
        // Markdown sources are not copied through
        assert!(!site.output_dir.join("blog/post.md").exists());
    }
}
