use crate::config::types::CrawlConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and validates a crawl configuration from a TOML file
///
/// Every field is optional in the file; missing fields take their
/// defaults. The result is validated before being returned.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use linksweep::config::load_config;
///
/// let config = load_config(Path::new("linksweep.toml")).unwrap();
/// println!("Concurrency limit: {}", config.concurrency_limit);
/// ```
pub fn load_config(path: &Path) -> Result<CrawlConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: CrawlConfig = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}
