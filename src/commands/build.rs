//! Generate the static site

use anyhow::Result;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::Folio;

/// Generate the static site in one pass
pub fn run(site: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(site);
    let entries = loader.load_entries()?;
    let pages = loader.load_pages()?;

    tracing::info!(
        "Loaded {} entries and {} pages",
        entries.len(),
        pages.len()
    );

    let generator = Generator::new(site)?;
    generator.generate(&entries, &pages)?;

    tracing::info!("Built in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
