//! Create a new blog entry

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::loader::BLOG_DIR;
use crate::Folio;

/// Create a new blog entry from the front-matter scaffold.
/// Returns the path of the created file.
pub fn run(site: &Folio, title: &str, draft: bool) -> Result<PathBuf> {
    let blog_dir = site.content_dir.join(BLOG_DIR);
    fs::create_dir_all(&blog_dir)?;

    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("title {:?} produces an empty slug", title);
    }

    let file_path = blog_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().date_naive();
    let draft_line = if draft { "draft = true\n" } else { "" };
    let content = format!(
        "+++\ntitle = \"{}\"\ndate = {}\n{}\n[taxonomies]\ncategories = []\ntags = []\n+++\n\n",
        title.replace('"', "\\\""),
        today.format("%Y-%m-%d"),
        draft_line,
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(file_path)
}
