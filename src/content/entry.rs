//! Entry and Page models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A blog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Entry title
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Last updated date
    pub updated: Option<NaiveDate>,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML body
    pub content: String,

    /// Entry tags
    pub tags: Vec<String>,

    /// Entry categories
    pub categories: Vec<String>,

    /// Whether the entry is a draft
    pub draft: bool,

    /// Source file path relative to the content directory
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL path (without the base URL)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Slug (URL-friendly name, derived from the file stem)
    pub slug: String,

    /// Custom front-matter fields
    pub extra: toml::Table,
}

impl Entry {
    /// Create a new entry with the required fields
    pub fn new(title: String, date: NaiveDate, source: String) -> Self {
        Self {
            title,
            date,
            updated: None,
            raw: String::new(),
            content: String::new(),
            tags: Vec::new(),
            categories: Vec::new(),
            draft: false,
            source: source.clone(),
            full_source: PathBuf::from(&source),
            path: String::new(),
            permalink: String::new(),
            slug: String::new(),
            extra: toml::Table::new(),
        }
    }

    /// Get the previous (older) entry in a date-descending list
    pub fn prev<'a>(&self, entries: &'a [Entry]) -> Option<&'a Entry> {
        let pos = entries.iter().position(|e| e.source == self.source)?;
        entries.get(pos + 1)
    }

    /// Get the next (newer) entry in a date-descending list
    pub fn next<'a>(&self, entries: &'a [Entry]) -> Option<&'a Entry> {
        let pos = entries.iter().position(|e| e.source == self.source)?;
        pos.checked_sub(1).map(|i| &entries[i])
    }
}

/// A standalone page, such as the resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page title
    pub title: String,

    /// Optional date; pages without one render undated
    pub date: Option<NaiveDate>,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML body
    pub content: String,

    /// Template overriding the default page template
    pub template: Option<String>,

    /// Source file path relative to the content directory
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL path (without the base URL)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Custom front-matter fields
    pub extra: toml::Table,
}

impl Page {
    /// Create a new page with the required fields
    pub fn new(title: String, source: String) -> Self {
        Self {
            title,
            date: None,
            raw: String::new(),
            content: String::new(),
            template: None,
            source: source.clone(),
            full_source: PathBuf::from(&source),
            path: String::new(),
            permalink: String::new(),
            extra: toml::Table::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, y: i32, m: u32, d: u32) -> Entry {
        Entry::new(
            title.to_string(),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            format!("blog/{}.md", title),
        )
    }

    #[test]
    fn test_prev_next_in_date_descending_list() {
        let entries = vec![
            entry("newest", 2024, 3, 1),
            entry("middle", 2023, 6, 10),
            entry("oldest", 2022, 1, 5),
        ];

        let middle = &entries[1];
        assert_eq!(middle.prev(&entries).unwrap().title, "oldest");
        assert_eq!(middle.next(&entries).unwrap().title, "newest");

        assert!(entries[0].next(&entries).is_none());
        assert!(entries[2].prev(&entries).is_none());
    }
}
