//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client
//! - Politeness delays before every attempt
//! - Retry logic for failed fetches
//! - Error classification for logging

use crate::config::CrawlConfig;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Browser-style user agent sent with every request
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Builds the HTTP client shared by all fetch tasks for a crawl
///
/// The client owns the connection pool; it is created before the
/// scheduler loop starts and dropped when the crawl terminates. The
/// per-request timeout comes from the configuration.
///
/// # Example
///
/// ```no_run
/// use linksweep::config::CrawlConfig;
/// use linksweep::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(config.timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying failed attempts up to the configured ceiling
///
/// Each attempt, retries included, starts with a politeness delay drawn
/// uniformly from `[delay_min, delay_max]`, so a retry storm cannot
/// hammer the server. Only a 200 response counts as success; any other
/// status, a timeout, or a transport error fails the attempt.
///
/// Returns the page body, or `None` once `max_retries` additional
/// attempts after the first failure are exhausted. A `None` result is
/// terminal: the caller marks the URL visited and it is never requeued.
pub async fn fetch_with_retry(client: &Client, url: &str, config: &CrawlConfig) -> Option<String> {
    let max_attempts = config.max_retries + 1;

    for attempt in 0..max_attempts {
        polite_delay(config).await;

        tracing::debug!("Fetching {} (attempt {}/{})", url, attempt + 1, max_attempts);

        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status == StatusCode::OK {
                    match response.text().await {
                        Ok(body) => {
                            tracing::debug!("Fetched {} ({} bytes)", url, body.len());
                            return Some(body);
                        }
                        Err(e) => {
                            tracing::warn!("Failed to read body from {}: {}", url, e);
                        }
                    }
                } else {
                    tracing::warn!("Fetch of {} returned status {}", url, status.as_u16());
                }
            }
            Err(e) if e.is_timeout() => {
                tracing::warn!("Timeout fetching {}", url);
            }
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", url, e);
            }
        }
    }

    tracing::warn!("Giving up on {} after {} attempts", url, max_attempts);
    None
}

/// Sleeps a random duration drawn uniformly from the configured range
///
/// The range is fixed per attempt; retries do not widen it.
async fn polite_delay(config: &CrawlConfig) {
    let secs = rand::thread_rng().gen_range(config.delay_min..=config.delay_max);
    if secs > 0.0 {
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_config(max_retries: u32) -> CrawlConfig {
        CrawlConfig {
            delay_min: 0.0,
            delay_max: 0.0,
            max_retries,
            request_timeout: 2.0,
            ..CrawlConfig::default()
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&CrawlConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;

        let config = fast_config(0);
        let client = build_http_client(&config).unwrap();
        let body = fetch_with_retry(&client, &format!("{}/page", server.uri()), &config).await;

        assert_eq!(body.as_deref(), Some("<html>hi</html>"));
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let config = fast_config(0);
        let client = build_http_client(&config).unwrap();
        let body = fetch_with_retry(&client, &format!("{}/missing", server.uri()), &config).await;

        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_retry_count_on_persistent_failure() {
        let server = MockServer::start().await;
        // Ceiling of 2 additional attempts: expect exactly 3 requests
        Mock::given(method("GET"))
            .and(path("/dead"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let config = fast_config(2);
        let client = build_http_client(&config).unwrap();
        let body = fetch_with_retry(&client, &format!("{}/dead", server.uri()), &config).await;

        assert!(body.is_none());
        server.verify().await;
    }

    #[tokio::test]
    async fn test_retry_recovers_after_transient_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
            .mount(&server)
            .await;

        let config = fast_config(2);
        let client = build_http_client(&config).unwrap();
        let body = fetch_with_retry(&client, &format!("{}/flaky", server.uri()), &config).await;

        assert_eq!(body.as_deref(), Some("recovered"));
    }
}
