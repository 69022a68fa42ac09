//! HTML link extraction
//!
//! Pulls raw `href` values out of anchor tags and composes them with the
//! normalizer and the same-origin filter to produce the set of crawlable
//! links on a page. Candidates that fail normalization or point off-domain
//! are expected noise and are dropped silently.

use crate::url::{normalize, same_origin};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts raw href strings from every `<a href>` in the markup
///
/// No normalization or filtering happens here; the values come back as
/// the page wrote them.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut hrefs = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    hrefs
}

/// Extracts the normalized, same-domain links from a page
///
/// Each href is resolved against `base` (the URL the page was fetched
/// from) and kept only when it shares the seed's origin. The result is a
/// set: a page linking to the same URL twice contributes it once.
///
/// # Arguments
///
/// * `html` - The fetched page markup
/// * `base` - The page's own URL, for relative resolution
/// * `seed` - The crawl seed, the origin comparison target
pub fn same_domain_links(html: &str, base: &Url, seed: &str) -> HashSet<String> {
    let mut links = HashSet::new();

    for href in extract_hrefs(html) {
        let normalized = match normalize(&href, base) {
            Ok(url) => url,
            Err(e) => {
                tracing::trace!("Skipping href {:?}: {}", href, e);
                continue;
            }
        };

        if !same_origin(&normalized, seed) {
            tracing::trace!("Skipping cross-domain link {}", normalized);
            continue;
        }

        links.insert(normalized);
    }

    tracing::debug!("Found {} same-domain links on {}", links.len(), base);
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_hrefs_basic() {
        let html = r#"<html><body>
            <a href="/a">A</a>
            <a href="https://example.com/b">B</a>
            <a>no href</a>
        </body></html>"#;

        let hrefs = extract_hrefs(html);
        assert_eq!(hrefs, vec!["/a", "https://example.com/b"]);
    }

    #[test]
    fn test_extract_hrefs_empty_document() {
        assert!(extract_hrefs("").is_empty());
        assert!(extract_hrefs("<html><body>plain text</body></html>").is_empty());
    }

    #[test]
    fn test_same_domain_links_filters_noise() {
        let html = r##"<html><body>
            <a href="https://example.com/page1">one</a>
            <a href="https://example.com/page2">two</a>
            <a href="https://other.com/x">elsewhere</a>
            <a href="mailto:a@b.com">mail</a>
            <a href="#frag">anchor</a>
        </body></html>"##;

        let base = Url::parse("https://example.com").unwrap();
        let links = same_domain_links(html, &base, "https://example.com");

        assert_eq!(links.len(), 2);
        assert!(links.contains("https://example.com/page1"));
        assert!(links.contains("https://example.com/page2"));
    }

    #[test]
    fn test_same_domain_links_resolves_relative() {
        let html = r#"<a href="/page#section">rel</a>"#;
        let base = Url::parse("https://example.com/dir/index.html").unwrap();

        let links = same_domain_links(html, &base, "https://example.com/");
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/page"));
    }

    #[test]
    fn test_same_domain_links_dedupes() {
        let html = r#"
            <a href="https://example.com/dup">first</a>
            <a href="https://example.com/dup">second</a>
            <a href="https://example.com/dup#frag">third</a>
        "#;
        let base = Url::parse("https://example.com/").unwrap();

        let links = same_domain_links(html, &base, "https://example.com/");
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_scheme_switch_stays_in_domain() {
        let html = r#"<a href="http://example.com/legacy">old</a>"#;
        let base = Url::parse("https://example.com/").unwrap();

        let links = same_domain_links(html, &base, "https://example.com/");
        assert!(links.contains("http://example.com/legacy"));
    }
}
