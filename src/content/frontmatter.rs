//! Front-matter parsing
//!
//! Entries start with a TOML metadata block fenced by `+++` lines, followed
//! by the Markdown body. Malformed metadata is an authoring error and is
//! surfaced as a hard failure rather than silently skipped.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrSeq;

    impl<'de> Visitor<'de> for StringOrSeq {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut items = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                items.push(item);
            }
            Ok(items)
        }
    }

    deserializer.deserialize_any(StringOrSeq)
}

/// The `[taxonomies]` table: grouping facets for browsing and filtering.
/// Duplicate terms across entries are expected, they are the grouping
/// mechanism.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomies {
    #[serde(deserialize_with = "string_or_seq", default)]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "string_or_seq", default)]
    pub tags: Vec<String>,
}

impl Taxonomies {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.tags.is_empty()
    }
}

/// Front-matter data from a blog entry or a standalone page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    /// Publication date, either a bare TOML date or a quoted ISO string
    pub date: Option<toml::Value>,
    pub updated: Option<toml::Value>,
    pub draft: bool,
    /// Alternate render template, overriding the section default
    pub template: Option<String>,
    pub taxonomies: Taxonomies,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl FrontMatter {
    /// Parse front-matter from the full file content.
    /// Returns (front_matter, remaining_body).
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let stripped = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(rest) = stripped.strip_prefix("+++") else {
            // No metadata block, the whole file is body
            return Ok((FrontMatter::default(), stripped));
        };

        let Some(end_pos) = rest.find("\n+++") else {
            bail!("front-matter block is missing its closing +++ delimiter");
        };

        let toml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if toml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm: FrontMatter =
            toml::from_str(toml_content).context("invalid TOML in front-matter block")?;
        Ok((fm, remaining))
    }

    /// Re-serialize the metadata to an equivalent `+++` block.
    /// `parse` of the result yields the same keys and values; formatting and
    /// key order may differ from the authored original.
    pub fn to_block(&self) -> Result<String> {
        let mut table = toml::Table::new();

        if let Some(title) = &self.title {
            table.insert("title".to_string(), toml::Value::String(title.clone()));
        }
        if let Some(date) = &self.date {
            table.insert("date".to_string(), date.clone());
        }
        if let Some(updated) = &self.updated {
            table.insert("updated".to_string(), updated.clone());
        }
        if self.draft {
            table.insert("draft".to_string(), toml::Value::Boolean(true));
        }
        if let Some(template) = &self.template {
            table.insert(
                "template".to_string(),
                toml::Value::String(template.clone()),
            );
        }

        // Plain extra values must precede any table to stay in the top-level
        // scope of the emitted document
        for (key, value) in &self.extra {
            if !value.is_table() {
                table.insert(key.clone(), value.clone());
            }
        }
        for (key, value) in &self.extra {
            if value.is_table() {
                table.insert(key.clone(), value.clone());
            }
        }

        if !self.taxonomies.is_empty() {
            let taxonomies = toml::Value::try_from(&self.taxonomies)
                .context("failed to serialize taxonomies")?;
            table.insert("taxonomies".to_string(), taxonomies);
        }

        let body = toml::to_string(&table).context("failed to serialize front-matter")?;
        Ok(format!("+++\n{}+++\n", body))
    }

    /// Parse the date field into a calendar date.
    /// `Ok(None)` means absent; a present but malformed date is an error.
    pub fn parse_date(&self) -> Result<Option<NaiveDate>> {
        parse_date_field(self.date.as_ref(), "date")
    }

    /// Parse the updated field into a calendar date
    pub fn parse_updated(&self) -> Result<Option<NaiveDate>> {
        parse_date_field(self.updated.as_ref(), "updated")
    }
}

fn parse_date_field(value: Option<&toml::Value>, field: &str) -> Result<Option<NaiveDate>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let text = match value {
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::String(s) => s.clone(),
        other => bail!("{} must be a date, got {}", field, other.type_str()),
    };

    match parse_date_string(&text) {
        Some(date) => Ok(Some(date)),
        None => bail!("{} is not a valid calendar date: {:?}", field, text),
    }
}

/// Parse a date string in the accepted formats, keeping only the calendar
/// date
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = r#"+++
title = "Digging into the ORM"
date = 2022-04-25

[taxonomies]
categories = ["programming"]
tags = ["rust", "orm"]
+++

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Digging into the ORM".to_string()));
        assert_eq!(fm.taxonomies.tags, vec!["rust", "orm"]);
        assert_eq!(fm.taxonomies.categories, vec!["programming"]);
        assert_eq!(
            fm.parse_date().unwrap(),
            Some(NaiveDate::from_ymd_opt(2022, 4, 25).unwrap())
        );
        assert!(remaining.contains("This is the content."));
    }

    #[test]
    fn test_parse_quoted_date() {
        let content = "+++\ntitle = \"Post\"\ndate = \"2023-01-02\"\n+++\nBody.";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.parse_date().unwrap(),
            Some(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap())
        );
    }

    #[test]
    fn test_parse_datetime_keeps_calendar_date() {
        let content = "+++\ndate = 2022-04-25T10:30:00Z\n+++\nBody.";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.parse_date().unwrap(),
            Some(NaiveDate::from_ymd_opt(2022, 4, 25).unwrap())
        );
    }

    #[test]
    fn test_invalid_date_is_an_error() {
        let content = "+++\ndate = \"not a date\"\n+++\nBody.";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.parse_date().is_err());
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just a body, no metadata.\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let content = "+++\ntitle = \"Broken\"\n\nBody without closing fence.";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let content = "+++\ntitle = not quoted\n+++\nBody.";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_single_string_tags() {
        let content = "+++\ntitle = \"One tag\"\n\n[taxonomies]\ntags = \"testing\"\n+++\nBody.";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.taxonomies.tags, vec!["testing"]);
    }

    #[test]
    fn test_template_override() {
        let content = "+++\ntitle = \"Resume\"\ntemplate = \"resume.html\"\n+++\nExperience.";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.template, Some("resume.html".to_string()));
    }

    #[test]
    fn test_extra_fields_preserved() {
        let content = "+++\ntitle = \"Post\"\nsummary = \"short\"\n+++\nBody.";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.extra.get("summary").and_then(|v| v.as_str()),
            Some("short")
        );
    }

    #[test]
    fn test_round_trip() {
        let content = r#"+++
title = "Mocking in Rust"
date = 2021-11-08
summary = "A mocking library design"

[taxonomies]
categories = ["programming"]
tags = ["rust", "testing", "mocks"]
+++
Body text.
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let block = fm.to_block().unwrap();
        let (reparsed, rest) = FrontMatter::parse(&block).unwrap();
        assert_eq!(fm, reparsed);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_round_trip_empty() {
        let fm = FrontMatter::default();
        let block = fm.to_block().unwrap();
        let (reparsed, _) = FrontMatter::parse(&block).unwrap();
        assert_eq!(fm, reparsed);
    }
}
