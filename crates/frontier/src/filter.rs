use sitewalk_core::CrawlConfig;

use crate::normalize::host_of;

/// Outcome of the admission check, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    OtherHost,
    Excluded(String),
    NotIncluded,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

/// Decide whether `url` may be traversed. Checks run in a fixed order and
/// short-circuit: host, exclude patterns, include patterns.
///
/// Patterns are plain case-sensitive substrings.
pub fn check(url: &str, start_url: &str, config: &CrawlConfig) -> Admission {
    if config.same_domain_only {
        let host = host_of(url);
        if host.is_none() || host != host_of(start_url) {
            return Admission::OtherHost;
        }
    }

    if let Some(pattern) = config.exclude_patterns.iter().find(|p| url.contains(p.as_str())) {
        return Admission::Excluded(pattern.clone());
    }

    if !config.include_patterns.is_empty()
        && !config.include_patterns.iter().any(|p| url.contains(p.as_str()))
    {
        return Admission::NotIncluded;
    }

    Admission::Admitted
}

pub fn admit(url: &str, start_url: &str, config: &CrawlConfig) -> bool {
    check(url, start_url, config).is_admitted()
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "https://a.test/";

    fn config() -> CrawlConfig {
        CrawlConfig::default()
    }

    #[test]
    fn test_same_domain() {
        let cfg = config();
        assert!(admit("https://a.test/x", START, &cfg));
        assert!(admit("http://A.TEST/y", START, &cfg));
        assert_eq!(check("https://other.test/y", START, &cfg), Admission::OtherHost);
        assert_eq!(check("https://sub.a.test/", START, &cfg), Admission::OtherHost);
        assert_eq!(check("not a url", START, &cfg), Admission::OtherHost);
    }

    #[test]
    fn test_cross_domain_when_disabled() {
        let cfg = CrawlConfig { same_domain_only: false, ..config() };
        assert!(admit("https://other.test/y", START, &cfg));
    }

    #[test]
    fn test_exclude_before_include() {
        let cfg = CrawlConfig {
            exclude_patterns: vec!["/admin".into()],
            include_patterns: vec!["/blog".into()],
            ..config()
        };
        assert_eq!(
            check("https://a.test/blog/admin", START, &cfg),
            Admission::Excluded("/admin".into())
        );
        assert_eq!(check("https://a.test/shop", START, &cfg), Admission::NotIncluded);
        assert!(admit("https://a.test/blog/first-post", START, &cfg));
    }

    #[test]
    fn test_patterns_case_sensitive() {
        let cfg = CrawlConfig { exclude_patterns: vec!["/Admin".into()], ..config() };
        assert!(admit("https://a.test/admin", START, &cfg));
        assert!(!admit("https://a.test/Admin", START, &cfg));
    }

    #[test]
    fn test_host_checked_first() {
        let cfg = CrawlConfig { include_patterns: vec!["/blog".into()], ..config() };
        assert_eq!(check("https://other.test/blog", START, &cfg), Admission::OtherHost);
    }
}
