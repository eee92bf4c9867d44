//! Changelog rendering and document merging

pub mod entry_render;
pub mod merge;

pub use entry_render::render_entry;
pub use merge::{merge_changelog, Preamble, TITLE_MARKER};
