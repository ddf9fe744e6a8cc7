//! Built-in "plain" theme rendered with the Tera template engine
//!
//! All templates are embedded in the binary, so a site needs no theme
//! directory of its own.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers;

/// Stylesheet shipped with the embedded theme
pub const STYLESHEET: &str = include_str!("plain/style.css");

/// Template renderer with the embedded plain theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all plain-theme templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The templates emit HTML fragments produced by the markdown
        // renderer, so autoescaping would double-escape them
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("base.html", include_str!("plain/base.html")),
            ("index.html", include_str!("plain/index.html")),
            ("entry.html", include_str!("plain/entry.html")),
            ("page.html", include_str!("plain/page.html")),
            ("resume.html", include_str!("plain/resume.html")),
            ("term.html", include_str!("plain/term.html")),
            ("terms.html", include_str!("plain/terms.html")),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("date_long", date_long_filter);

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Whether a template with this name exists
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: format an ISO date string as "April 25, 2022"
fn date_long_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_long", "value", String, value);
    match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        Ok(date) => Ok(tera::Value::String(helpers::format_long(&date))),
        Err(_) => Ok(tera::Value::String(s)),
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub base_url: String,
    pub tag_dir: String,
    pub category_dir: String,
    pub extra: toml::Table,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryData {
    pub title: String,
    pub date: String,
    pub path: String,
    pub permalink: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub title: String,
    pub date: Option<String>,
    pub path: String,
    pub permalink: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TermData {
    pub name: String,
    pub path: String,
    pub count: usize,
    pub entries: Vec<EntryData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub per_page: usize,
    pub total: usize,
    pub current: usize,
    pub prev_link: String,
    pub next_link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavEntry {
    pub title: String,
    pub path: String,
}
