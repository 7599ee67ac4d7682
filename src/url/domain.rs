use url::Url;

/// Extracts the hostname that defines a crawl scope
///
/// The host is returned exactly as the URL parser reports it. No subdomain folding
/// is applied: `sub.example.com` and `example.com` are different scopes.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use ngram_spider::url::extract_domain;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com"));
///
/// let url = Url::parse("https://sub.example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("sub.example.com"));
/// ```
pub fn extract_domain(url: &Url) -> Option<&str> {
    url.host_str()
}

/// Returns true if `url` belongs to the crawl scope `scope`
///
/// The comparison is an exact string match on the hostname; ports and schemes
/// are not part of the scope.
pub fn in_scope(scope: &str, url: &Url) -> bool {
    extract_domain(url) == Some(scope)
}
