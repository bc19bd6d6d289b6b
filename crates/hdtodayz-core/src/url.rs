//! URL helper functions
//!
//! Resolves links found in markup against a site's base URL and builds
//! search and listing URLs from adapter templates.

use url::Url;

use crate::types::MediaType;

/// Placeholder replaced by the encoded query in search path templates
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Resolves `href` against `base`
///
/// Absolute http(s) URLs pass through unchanged (only trimmed). Empty
/// values, bare fragments and any other scheme (`javascript:`, `mailto:`,
/// `tel:` ...) resolve to `None`, as does anything when `base` itself is
/// not a valid absolute URL.
///
/// # Example
/// ```
/// use hdtodayz_core::url::absolutize;
/// let url = absolutize("https://hdtodayz.to", "/movie/dune");
/// assert_eq!(url.as_deref(), Some("https://hdtodayz.to/movie/dune"));
/// assert_eq!(absolutize("https://hdtodayz.to", "mailto:a@b.c"), None);
/// ```
pub fn absolutize(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    // The url parser drops tabs and newlines, so the scheme is only
    // trustworthy after parsing
    let (resolved, absolute) = match Url::parse(href) {
        Ok(url) => (url, true),
        Err(_) => (Url::parse(base.trim()).ok()?.join(href).ok()?, false),
    };
    if !is_web_scheme(&resolved) {
        return None;
    }

    Some(if absolute {
        href.to_string()
    } else {
        resolved.into()
    })
}

fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Classifies a URL by the site's series path marker
///
/// Without a marker every URL is a movie.
///
/// # Example
/// ```
/// use hdtodayz_core::url::classify;
/// use hdtodayz_core::MediaType;
/// assert_eq!(classify("https://x.to/tv-series/lost-1", Some("/tv-series/")), MediaType::Series);
/// assert_eq!(classify("https://x.to/movie/dune", Some("/tv-series/")), MediaType::Movie);
/// ```
pub fn classify(url: &str, series_marker: Option<&str>) -> MediaType {
    match series_marker {
        Some(marker) if !marker.is_empty() && url.contains(marker) => MediaType::Series,
        _ => MediaType::Movie,
    }
}

/// Builds the absolute search URL for a query
///
/// The query is trimmed, percent-encoded and substituted for `{query}`
/// in `search_path`.
///
/// # Example
/// ```
/// use hdtodayz_core::url::build_search_url;
/// let url = build_search_url("https://hdtodayz.com", "/search?q={query}", "dune part two");
/// assert_eq!(url.as_deref(), Some("https://hdtodayz.com/search?q=dune%20part%20two"));
/// ```
pub fn build_search_url(base: &str, search_path: &str, query: &str) -> Option<String> {
    let encoded = urlencoding::encode(query.trim());
    let path = search_path.replace(QUERY_PLACEHOLDER, &encoded);
    absolutize(base, &path)
}

/// Appends the page parameter to a listing URL
///
/// # Example
/// ```
/// use hdtodayz_core::url::build_listing_url;
/// assert_eq!(build_listing_url("https://hdtodayz.to/movies", 2), "https://hdtodayz.to/movies?page=2");
/// assert_eq!(build_listing_url("https://hdtodayz.to/filter?type=tv", 3), "https://hdtodayz.to/filter?type=tv&page=3");
/// ```
pub fn build_listing_url(source_url: &str, page: u32) -> String {
    let separator = if source_url.contains('?') { '&' } else { '?' };
    format!("{}{}page={}", source_url, separator, page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: &str = "https://hdtodayz.to";

    #[test]
    fn test_absolutize_relative_path() {
        assert_eq!(
            absolutize(BASE, "/movie/dune"),
            Some("https://hdtodayz.to/movie/dune".to_string())
        );
    }

    #[test]
    fn test_absolutize_relative_without_slash() {
        assert_eq!(
            absolutize("https://hdtodayz.to/genre/", "action"),
            Some("https://hdtodayz.to/genre/action".to_string())
        );
    }

    #[test]
    fn test_absolutize_protocol_relative() {
        assert_eq!(
            absolutize(BASE, "//img.cdn.example/p.jpg"),
            Some("https://img.cdn.example/p.jpg".to_string())
        );
    }

    #[test]
    fn test_absolutize_absolute_passthrough() {
        assert_eq!(
            absolutize(BASE, "  https://cdn.example/x.m3u8 "),
            Some("https://cdn.example/x.m3u8".to_string())
        );
    }

    #[test]
    fn test_absolutize_rejects_empty_and_scripts() {
        assert_eq!(absolutize(BASE, ""), None);
        assert_eq!(absolutize(BASE, "   "), None);
        assert_eq!(absolutize(BASE, "#"), None);
        assert_eq!(absolutize(BASE, "JavaScript:void(0)"), None);
        assert_eq!(absolutize(BASE, "java\tscript:alert(1)"), None);
        assert_eq!(absolutize(BASE, "java\nscript:alert(1)"), None);
    }

    #[test]
    fn test_absolutize_rejects_non_web_schemes() {
        assert_eq!(absolutize(BASE, "mailto:a@b.c"), None);
        assert_eq!(absolutize(BASE, "tel:+123456"), None);
        assert_eq!(absolutize(BASE, "data:text/html,hi"), None);
        assert_eq!(absolutize("ftp://files.example", "/movie/dune"), None);
    }

    #[test]
    fn test_absolutize_invalid_base() {
        assert_eq!(absolutize("not a base", "/movie/dune"), None);
    }

    #[test]
    fn test_classify_without_marker() {
        assert_eq!(classify("https://x.to/tv-series/lost", None), MediaType::Movie);
        assert_eq!(classify("https://x.to/tv-series/lost", Some("")), MediaType::Movie);
    }

    #[test]
    fn test_build_search_url_path_template() {
        assert_eq!(
            build_search_url(BASE, "/search/{query}", "  the office "),
            Some("https://hdtodayz.to/search/the%20office".to_string())
        );
    }

    #[test]
    fn test_build_search_url_encodes_reserved() {
        assert_eq!(
            build_search_url(BASE, "/search?q={query}", "tom & jerry"),
            Some("https://hdtodayz.to/search?q=tom%20%26%20jerry".to_string())
        );
    }

    proptest! {
        #[test]
        fn prop_absolutize_is_idempotent(href in "[a-zA-Z0-9/._?=&#:-]{0,40}") {
            if let Some(once) = absolutize(BASE, &href) {
                prop_assert_eq!(absolutize(BASE, &once), Some(once.clone()));
            }
        }

        #[test]
        fn prop_classify_is_total_and_stable(url in ".{0,60}") {
            let first = classify(&url, Some("/tv-series/"));
            prop_assert_eq!(first, classify(&url, Some("/tv-series/")));
            prop_assert_eq!(first == MediaType::Series, url.contains("/tv-series/"));
        }
    }
}
