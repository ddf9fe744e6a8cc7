//! List site content

use anyhow::Result;

use crate::content::{taxonomy, ContentLoader};
use crate::Folio;

/// List site content by type
pub fn run(site: &Folio, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(site);

    match content_type {
        "entry" | "entries" | "post" | "posts" => {
            let entries = loader.load_entries()?;
            println!("Entries ({}):", entries.len());
            for entry in entries {
                println!(
                    "  {} - {} [{}]",
                    entry.date.format("%Y-%m-%d"),
                    entry.title,
                    entry.source
                );
            }
        }
        "page" | "pages" => {
            let pages = loader.load_pages()?;
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {} [{}]", page.title, page.source);
            }
        }
        "tag" | "tags" => {
            let entries = loader.load_entries()?;
            let terms = taxonomy::tags(&entries, &site.config.tag_dir);
            println!("Tags ({}):", terms.len());
            for term in terms {
                println!("  {} ({})", term.name, term.count());
            }
        }
        "category" | "categories" => {
            let entries = loader.load_entries()?;
            let terms = taxonomy::categories(&entries, &site.config.category_dir);
            println!("Categories ({}):", terms.len());
            for term in terms {
                println!("  {} ({})", term.name, term.count());
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: entry, page, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
