//! Validate the content corpus
//!
//! Unlike `build`, which fails on the first malformed entry, `check` scans
//! every file and reports all problems at once.

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::loader::BLOG_DIR;
use crate::content::FrontMatter;
use crate::Folio;

/// One data-shape problem in one file
#[derive(Debug)]
pub struct Violation {
    pub file: String,
    pub message: String,
}

/// Check every entry and report all violations
pub fn run(site: &Folio) -> Result<()> {
    let (checked, violations) = collect(site)?;

    for v in &violations {
        println!("{}: {}", v.file, v.message);
    }

    if !violations.is_empty() {
        bail!("{} problem(s) found in {} file(s)", violations.len(), checked);
    }

    println!("All good: {} file(s) checked", checked);
    Ok(())
}

/// Scan the corpus and collect violations without stopping at the first.
/// Returns (files_checked, violations).
pub fn collect(site: &Folio) -> Result<(usize, Vec<Violation>)> {
    let mut violations = Vec::new();
    let mut checked = 0;

    if !site.content_dir.exists() {
        return Ok((0, violations));
    }

    for dirent in WalkDir::new(&site.content_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = dirent.path();
        if !path.is_file() || !is_markdown(path) {
            continue;
        }
        checked += 1;

        let file = path
            .strip_prefix(&site.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();
        // Compare the first path component, matching the loader's section
        // test; a page like blogroll.md is not a blog entry
        let is_blog = Path::new(&file).starts_with(BLOG_DIR);

        let content = fs::read_to_string(path)?;
        let fm = match FrontMatter::parse(&content) {
            Ok((fm, _)) => fm,
            Err(e) => {
                violations.push(Violation {
                    file,
                    message: format!("{:#}", e),
                });
                continue;
            }
        };

        check_title(&fm, &file, &mut violations);
        check_dates(&fm, is_blog, &file, &mut violations);
        check_terms(&fm, &file, &mut violations);
    }

    Ok((checked, violations))
}

fn check_title(fm: &FrontMatter, file: &str, out: &mut Vec<Violation>) {
    match &fm.title {
        None => out.push(violation(file, "missing title")),
        Some(t) if t.trim().is_empty() => out.push(violation(file, "empty title")),
        Some(_) => {}
    }
}

fn check_dates(fm: &FrontMatter, is_blog: bool, file: &str, out: &mut Vec<Violation>) {
    match fm.parse_date() {
        Ok(Some(_)) => {}
        Ok(None) if is_blog => out.push(violation(file, "missing date")),
        Ok(None) => {}
        Err(e) => out.push(violation(file, &format!("{:#}", e))),
    }
    if let Err(e) = fm.parse_updated() {
        out.push(violation(file, &format!("{:#}", e)));
    }
}

fn check_terms(fm: &FrontMatter, file: &str, out: &mut Vec<Violation>) {
    let terms = fm
        .taxonomies
        .tags
        .iter()
        .map(|t| ("tag", t))
        .chain(fm.taxonomies.categories.iter().map(|c| ("category", c)));

    for (kind, term) in terms {
        if term.trim().is_empty() {
            out.push(violation(file, &format!("empty {} name", kind)));
        } else if term.chars().any(|c| c == '"' || c.is_control()) {
            out.push(violation(
                file,
                &format!("{} {:?} contains characters that break front matter", kind, term),
            ));
        }
    }
}

fn violation(file: &str, message: &str) -> Violation {
    Violation {
        file: file.to_string(),
        message: message.to_string(),
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
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn check(dir: &TempDir) -> (usize, Vec<Violation>) {
        let site = Folio::with_config(dir.path(), SiteConfig::default());
        collect(&site).unwrap()
    }

    #[test]
    fn test_clean_corpus_has_no_violations() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "content/blog/good.md",
            "+++\ntitle = \"Good\"\ndate = 2022-04-25\n\n[taxonomies]\ntags = [\"rust\"]\n+++\n.",
        );
        write(
            dir.path(),
            "content/resume/index.md",
            "+++\ntitle = \"Resume\"\ntemplate = \"resume.html\"\n+++\n.",
        );

        let (checked, violations) = check(&dir);
        assert_eq!(checked, 2);
        assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_reports_all_problems_not_just_first() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "content/blog/bad-date.md",
            "+++\ntitle = \"Bad\"\ndate = \"soonish\"\n+++\n.",
        );
        write(
            dir.path(),
            "content/blog/no-title.md",
            "+++\ndate = 2022-01-01\n+++\n.",
        );

        let (_, violations) = check(&dir);
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_missing_date_only_flagged_for_blog() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/about.md", "+++\ntitle = \"About\"\n+++\n.");
        write(dir.path(), "content/blog/p.md", "+++\ntitle = \"P\"\n+++\n.");

        let (_, violations) = check(&dir);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].file, "blog/p.md");
        assert_eq!(violations[0].message, "missing date");
    }

    #[test]
    fn test_blog_prefixed_page_is_not_a_blog_entry() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "content/blogroll.md",
            "+++\ntitle = \"Blogroll\"\n+++\nLinks I read.",
        );

        let (checked, violations) = check(&dir);
        assert_eq!(checked, 1);
        // A dateless standalone page is fine, only content/blog/ requires one
        assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_bad_taxonomy_terms() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "content/blog/p.md",
            "+++\ntitle = \"P\"\ndate = 2022-01-01\n\n[taxonomies]\ntags = [\"ok\", \"\", \"has\\\"quote\"]\n+++\n.",
        );

        let (_, violations) = check(&dir);
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_unparseable_front_matter_reported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/blog/broken.md", "+++\ntitle = \"x\"\nBody.");

        let (_, violations) = check(&dir);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("closing"));
    }
}
