//! Feed module
//!
//! Renders a feed's entries as an Atom or RSS document.

mod atom;
pub mod renderer;
mod rss;

pub use renderer::render;
