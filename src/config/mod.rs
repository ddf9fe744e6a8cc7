//! Configuration loading

mod site;

pub use site::{HighlightConfig, SiteConfig};
