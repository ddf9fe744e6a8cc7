//! Taxonomy grouping - tags and categories over the blog collection

use std::collections::BTreeMap;

use super::Entry;

/// One taxonomy term (a tag or a category) with the entries it groups.
/// Entries keep the global date-descending order.
#[derive(Debug, Clone)]
pub struct Term<'a> {
    pub name: String,
    pub slug: String,
    /// URL path of the term page
    pub path: String,
    pub entries: Vec<&'a Entry>,
}

impl<'a> Term<'a> {
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Group entries by taxonomy term, sorted by term name.
///
/// Duplicate terms across entries are the grouping mechanism; empty or
/// whitespace-only terms never get a page (`check` reports them instead).
pub fn group_by<'a, F>(entries: &'a [Entry], select: F, dir: &str) -> Vec<Term<'a>>
where
    F: Fn(&Entry) -> &[String],
{
    let mut groups: BTreeMap<&str, Vec<&Entry>> = BTreeMap::new();

    for entry in entries {
        for term in select(entry) {
            if term.trim().is_empty() {
                continue;
            }
            groups.entry(term.as_str()).or_default().push(entry);
        }
    }

    groups
        .into_iter()
        .filter_map(|(name, entries)| {
            let slug = slug::slugify(name);
            if slug.is_empty() {
                return None;
            }
            Some(Term {
                name: name.to_string(),
                slug: slug.clone(),
                path: format!("/{}/{}/", dir, slug),
                entries,
            })
        })
        .collect()
}

/// Group entries by tag
pub fn tags<'a>(entries: &'a [Entry], tag_dir: &str) -> Vec<Term<'a>> {
    group_by(entries, |e| &e.tags, tag_dir)
}

/// Group entries by category
pub fn categories<'a>(entries: &'a [Entry], category_dir: &str) -> Vec<Term<'a>> {
    group_by(entries, |e| &e.categories, category_dir)
}
