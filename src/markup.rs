//! Remarkup rendering.
//!
//! This module converts the lightweight wiki markup used in task
//! descriptions and comments into HTML fragments. It understands inline
//! styles, headers, indented and fenced pre blocks, bracketed and bare
//! links, and short object references like `{T123}`.

mod blocks;
mod buffer;
mod links;
mod renderer;
mod style;

pub use links::ReferenceResolver;
pub use renderer::MarkupRenderer;
pub use style::StyleMarker;
