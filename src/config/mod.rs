//! Configuration module for linksweep
//!
//! Crawl options can come from CLI flags, a TOML file, or both; this
//! module owns the types, the file loading, and the invariant checks.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::CrawlConfig;
pub use validation::validate;
