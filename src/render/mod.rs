//! Adapters turning numeric layout output into drawable formats.

pub mod svg;

pub use svg::{render_document, ribbon_path, tooltip};
