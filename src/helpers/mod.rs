//! Small helpers shared by the generator and templates

mod date;
mod html;

pub use date::*;
pub use html::*;
