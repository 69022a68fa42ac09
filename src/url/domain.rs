use url::Url;

/// Extracts the authority (host plus explicit port) from a URL string
///
/// The host is lowercased; the port is included only when written
/// explicitly, so `https://example.com` and `https://example.com:443`
/// produce different authorities.
///
/// # Examples
///
/// ```
/// use linksweep::url::extract_authority;
///
/// assert_eq!(extract_authority("https://Example.COM/path"), Some("example.com".to_string()));
/// assert_eq!(extract_authority("http://example.com:8080/"), Some("example.com:8080".to_string()));
/// assert_eq!(extract_authority("not a url"), None);
/// ```
pub fn extract_authority(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();

    match parsed.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Checks whether two URLs share an origin for crawling purposes
///
/// Compares host and explicit port only. The scheme is deliberately not
/// compared, so an `http://` link on an `https://` site (or vice versa)
/// stays in-domain. A URL that fails to parse is never same-origin.
///
/// # Arguments
///
/// * `url` - The candidate URL (already normalized)
/// * `seed` - The crawl's seed URL
pub fn same_origin(url: &str, seed: &str) -> bool {
    match (extract_authority(url), extract_authority(seed)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
