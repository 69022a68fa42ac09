//! Output module for persisting discovered links
//!
//! The crawl engine's only obligation here is to hand over well-formed,
//! already-normalized URL strings; this module owns the on-disk formats.
//! The format is selected by output file extension: newline-delimited
//! text, CSV with a header row, or a JSON array.

mod writer;

pub use writer::{default_output_path, LinkWriter, OutputFormat};
