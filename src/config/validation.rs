use crate::config::types::CrawlConfig;
use crate::ConfigError;

/// Validates the crawl configuration
///
/// Checked invariants:
/// - `concurrency_limit` between 1 and 100
/// - delays non-negative with `delay_min <= delay_max`
/// - `request_timeout` positive
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.concurrency_limit < 1 || config.concurrency_limit > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency-limit must be between 1 and 100, got {}",
            config.concurrency_limit
        )));
    }

    if config.delay_min < 0.0 || config.delay_max < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delays must be non-negative, got min={} max={}",
            config.delay_min, config.delay_max
        )));
    }

    if config.delay_min > config.delay_max {
        return Err(ConfigError::Validation(format!(
            "delay-min ({}) must not exceed delay-max ({})",
            config.delay_min, config.delay_max
        )));
    }

    if config.request_timeout <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be positive, got {}",
            config.request_timeout
        )));
    }

    Ok(())
}
