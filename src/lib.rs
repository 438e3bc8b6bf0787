//! Remarkup to HTML conversion for task descriptions and comments.

mod config;
mod discussion;
mod markup;
pub mod page;

pub use config::Config;
pub use discussion::{Author, Comment, Discussion};
pub use markup::{MarkupRenderer, ReferenceResolver, StyleMarker};
