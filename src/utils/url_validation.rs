//! Absolute-URL validation for playground URL prefixes.
//!
//! `url::Url::parse` alone is too permissive for user-facing configuration:
//! it accepts single-label hosts like `https://invalid-url`, which are almost
//! always typos rather than reachable services. The check here requires an
//! http(s) scheme and a host that is an IP literal, `localhost`, or a dotted
//! domain with an alphabetic TLD.

use url::{Host, Url};

/// Returns true if `candidate` is an absolute http(s) URL with a usable host.
pub fn is_absolute_http_url(candidate: &str) -> bool {
    let Ok(url) = Url::parse(candidate) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => domain == "localhost" || has_registrable_suffix(domain),
        None => false,
    }
}

/// A dotted hostname whose last label is alphabetic and at least two
/// characters long, e.g. `example.com` but not `invalid-url` or `host.1`.
fn has_registrable_suffix(domain: &str) -> bool {
    if !domain.contains('.') {
        return false;
    }

    domain
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_urls() {
        assert!(is_absolute_http_url("https://python.example.com"));
        assert!(is_absolute_http_url("http://example.com/run?code={code}"));
        assert!(is_absolute_http_url("https://sub.domain.example.org/path"));
    }

    #[test]
    fn test_accepts_localhost_and_ips() {
        assert!(is_absolute_http_url("http://localhost:8080"));
        assert!(is_absolute_http_url("http://127.0.0.1/run"));
        assert!(is_absolute_http_url("http://[::1]:3000/"));
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert!(!is_absolute_http_url("python.example.com"));
        assert!(!is_absolute_http_url("//example.com/path"));
        assert!(!is_absolute_http_url(""));
    }

    #[test]
    fn test_rejects_single_label_host() {
        assert!(!is_absolute_http_url("https://invalid-url"));
        assert!(!is_absolute_http_url("https://intranet/run"));
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(!is_absolute_http_url("ftp://example.com/file"));
        assert!(!is_absolute_http_url("mailto:user@example.com"));
        assert!(!is_absolute_http_url("javascript:alert(1)"));
    }

    #[test]
    fn test_rejects_numeric_tld() {
        assert!(!is_absolute_http_url("https://example.123"));
    }
}
