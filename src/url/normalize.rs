use crate::UrlError;
use url::Url;

/// Schemes that carry no navigable resource and are always rejected
const NON_NAVIGABLE_SCHEMES: &[&str] = &["mailto:", "javascript:", "tel:"];

/// Normalizes a raw href into an absolute, fragment-free URL string
///
/// # Normalization Rules
///
/// 1. Reject empty input and `mailto:` / `javascript:` / `tel:` schemes
/// 2. Reject bare fragment references (`#...`) — they name the same page
/// 3. An already-absolute http(s) URL is returned as given, minus its
///    fragment: trailing slashes, query-parameter order, and case are
///    preserved (so `/page` and `/page/` stay distinct URLs)
/// 4. A relative reference is resolved against `base` per RFC 3986, then
///    the fragment is removed
/// 5. The result must start with `http://` or `https://`
///
/// Idempotent: normalizing an already-normalized URL returns it unchanged,
/// since it takes the absolute branch and carries no fragment.
///
/// # Arguments
///
/// * `raw` - The href as it appeared in markup (or user input)
/// * `base` - The URL of the page the href was found on
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linksweep::url::normalize;
///
/// let base = Url::parse("https://example.com/dir/index.html").unwrap();
/// let url = normalize("/page#section", &base).unwrap();
/// assert_eq!(url, "https://example.com/page");
/// ```
pub fn normalize(raw: &str, base: &Url) -> Result<String, UrlError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(UrlError::Empty);
    }

    for scheme in NON_NAVIGABLE_SCHEMES {
        if raw.starts_with(scheme) {
            return Err(UrlError::InvalidScheme(scheme.trim_end_matches(':').to_string()));
        }
    }

    // Same-page anchor
    if raw.starts_with('#') {
        return Err(UrlError::Parse("fragment-only reference".to_string()));
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        // Strip the fragment without reserializing: the URL is otherwise
        // kept byte-identical to how the page wrote it.
        let defragmented = match raw.split_once('#') {
            Some((before, _)) => before,
            None => raw,
        };

        // Still has to carry a parseable authority
        let parsed =
            Url::parse(defragmented).map_err(|e| UrlError::Parse(e.to_string()))?;
        if parsed.host_str().is_none() {
            return Err(UrlError::MissingAuthority);
        }

        return Ok(defragmented.to_string());
    }

    // Relative reference: resolve against the page it was found on
    let mut resolved = base
        .join(raw)
        .map_err(|e| UrlError::Parse(e.to_string()))?;
    resolved.set_fragment(None);

    let result = resolved.to_string();
    if !result.starts_with("http://") && !result.starts_with("https://") {
        return Err(UrlError::InvalidScheme(resolved.scheme().to_string()));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/dir/index.html").unwrap()
    }

    #[test]
    fn test_reject_mailto() {
        let result = normalize("mailto:a@b.com", &base());
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_reject_javascript() {
        let result = normalize("javascript:void(0)", &base());
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_reject_tel() {
        let result = normalize("tel:+15551234567", &base());
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_reject_bare_fragment() {
        assert!(normalize("#section", &base()).is_err());
    }

    #[test]
    fn test_reject_empty() {
        assert!(matches!(normalize("", &base()).unwrap_err(), UrlError::Empty));
        assert!(matches!(normalize("   ", &base()).unwrap_err(), UrlError::Empty));
    }

    #[test]
    fn test_absolute_url_unchanged() {
        let result = normalize("https://example.com/Page?b=2&a=1", &base()).unwrap();
        assert_eq!(result, "https://example.com/Page?b=2&a=1");
    }

    #[test]
    fn test_absolute_url_fragment_stripped() {
        let result = normalize("https://example.com/page#frag", &base()).unwrap();
        assert_eq!(result, "https://example.com/page");
    }

    #[test]
    fn test_trailing_slash_preserved() {
        assert_eq!(
            normalize("https://example.com/page/", &base()).unwrap(),
            "https://example.com/page/"
        );
        assert_eq!(
            normalize("https://example.com/page", &base()).unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_relative_resolution() {
        let result = normalize("/page#section", &base()).unwrap();
        assert_eq!(result, "https://example.com/page");
    }

    #[test]
    fn test_relative_sibling_resolution() {
        let result = normalize("other.html", &base()).unwrap();
        assert_eq!(result, "https://example.com/dir/other.html");
    }

    #[test]
    fn test_protocol_relative_resolution() {
        let result = normalize("//other.com/x", &base()).unwrap();
        assert_eq!(result, "https://other.com/x");
    }

    #[test]
    fn test_reject_non_http_after_resolution() {
        let ftp_base = Url::parse("ftp://example.com/").unwrap();
        assert!(normalize("file.txt", &ftp_base).is_err());
    }

    #[test]
    fn test_idempotence() {
        let b = base();
        for raw in [
            "/page#section",
            "https://example.com/a/b?q=1",
            "relative/path",
            "https://example.com/page/",
        ] {
            let once = normalize(raw, &b).unwrap();
            let twice = normalize(&once, &b).unwrap();
            assert_eq!(once, twice, "normalize not idempotent for {}", raw);
        }
    }

    #[test]
    fn test_query_order_preserved() {
        let result = normalize("https://example.com/p?z=1&a=2", &base()).unwrap();
        assert_eq!(result, "https://example.com/p?z=1&a=2");
    }
}
