//! Content module - entries, pages, front matter, and rendering

mod entry;
mod frontmatter;
pub mod loader;
mod markdown;
pub mod taxonomy;

pub use entry::{Entry, Page};
pub use frontmatter::{FrontMatter, Taxonomies};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
