use url::{ParseError, Url};

/// Resolve `raw` against `base` into an absolute URL.
///
/// Handles absolute, protocol-relative (`//host/p`), root-relative (`/p`) and
/// document-relative (`p`, `../p`) forms. `None` when either side is unusable.
pub fn resolve(raw: &str, base: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(base).ok()?.join(raw).ok(),
        Err(_) => None,
    }
}

/// Canonical dedup key for a URL: fragment dropped, trailing slashes removed
/// from any non-root path. Host casing and default ports are already
/// canonicalized by the parser.
pub fn canonical(url: &Url) -> String {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    if !normalized.cannot_be_a_base() {
        let path = normalized.path().to_string();
        if path.len() > 1 && path.ends_with('/') {
            let trimmed = path.trim_end_matches('/');
            normalized.set_path(if trimmed.is_empty() { "/" } else { trimmed });
        }
    }
    normalized.to_string()
}

/// Normalize `raw` (resolved against `base`) into an equality key.
///
/// Fails soft: input that cannot be resolved comes back unchanged, so it can
/// still serve as an (imperfect) dedup key.
pub fn normalize(raw: &str, base: &str) -> String {
    match resolve(raw, base) {
        Some(url) => canonical(&url),
        None => raw.to_string(),
    }
}

/// Lower-cased hostname, if the URL has one.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
}

/// Only documents reachable over HTTP(S) are worth navigating to.
pub fn is_navigable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://a.test/docs/guide/";

    #[test]
    fn test_relative_forms() {
        assert_eq!(normalize("/x", BASE), "https://a.test/x");
        assert_eq!(normalize("intro", BASE), "https://a.test/docs/guide/intro");
        assert_eq!(normalize("../api/", BASE), "https://a.test/docs/api");
        assert_eq!(normalize("//cdn.test/lib/", BASE), "https://cdn.test/lib");
        assert_eq!(normalize("https://B.test/Y/#top", BASE), "https://b.test/Y");
    }

    #[test]
    fn test_root_keeps_slash() {
        assert_eq!(normalize("https://a.test", BASE), "https://a.test/");
        assert_eq!(normalize("https://a.test/", BASE), "https://a.test/");
        assert_eq!(normalize("https://a.test//", BASE), "https://a.test/");
        assert_eq!(normalize("https://a.test/#hero", BASE), "https://a.test/");
    }

    #[test]
    fn test_query_survives() {
        assert_eq!(normalize("/search/?q=1#r", BASE), "https://a.test/search?q=1");
    }

    #[test]
    fn test_malformed_returned_unchanged() {
        assert_eq!(normalize("http://[::1", BASE), "http://[::1");
        assert_eq!(normalize("/x", "not a base"), "/x");
        assert_eq!(normalize("", BASE), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "https://a.test/x/",
            "https://a.test/x//",
            "https://a.test",
            "/blog/post/#c",
            "../up",
            "//other.test/",
            "mailto:someone@a.test",
            "http://[::1",
            "https://a.test/a/?q=%20x#f",
            "  /padded  ",
        ];
        for raw in samples {
            let once = normalize(raw, BASE);
            assert_eq!(normalize(&once, BASE), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://A.Test/x").as_deref(), Some("a.test"));
        assert_eq!(host_of("/relative"), None);
    }
}
