use crate::shortener::{is_shortener_host, ShortLinkResolver};
use crate::WarningList;
use regex::Regex;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// URLs longer than this (in characters) are flagged.
pub const LONG_URL_THRESHOLD: usize = 100;

const LONG_URL: &str = "Very long URL, may conceal something.";
const USER_PASSWORD: &str = "URL with user/password, may be deceptive.";
const ENCODED_CHARACTERS: &str = "URL with encoded characters, may mask intent.";
const INSECURE_CONNECTION: &str = "Insecure connection (not HTTPS).";

/// Structural checks over a decoded link.
///
/// Checks run in a fixed order and never short-circuit; the order of the
/// returned warnings follows the order of the checks.
pub struct UrlSuspicionAnalyzer {
    resolver: Arc<dyn ShortLinkResolver>,
    credentials: Regex,
    redirect_param: Regex,
    percent_escape: Regex,
}

impl UrlSuspicionAnalyzer {
    pub fn new(resolver: Arc<dyn ShortLinkResolver>) -> Self {
        Self {
            resolver,
            credentials: Regex::new(r"https?://([^/@]+)@([^/]+)").expect("credentials pattern"),
            redirect_param: Regex::new(r"(?:redirect|url|destination)=([^&]+)")
                .expect("redirect pattern"),
            percent_escape: Regex::new(r"(?i)%[0-9a-f]{2}").expect("percent-escape pattern"),
        }
    }

    /// Run every check against `url`. A URL that does not parse yields no warnings.
    pub async fn analyze(&self, url: &str) -> WarningList {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Not a parseable URL ({}), nothing to analyze", e);
                return Vec::new();
            }
        };

        let mut warnings = Vec::new();

        self.check_length(url, &mut warnings);
        self.check_credentials(url, &mut warnings);
        self.check_redirect_param(url, &mut warnings);
        self.check_encoded_characters(url, &mut warnings);
        self.check_shortener(url, &parsed, &mut warnings).await;
        self.check_transport(&parsed, &mut warnings);

        debug!("URL analysis produced {} warning(s)", warnings.len());
        warnings
    }

    fn check_length(&self, url: &str, warnings: &mut WarningList) {
        if url.chars().count() > LONG_URL_THRESHOLD {
            warnings.push(LONG_URL.to_string());
        }
    }

    fn check_credentials(&self, url: &str, warnings: &mut WarningList) {
        let Some(caps) = self.credentials.captures(url) else {
            return;
        };

        let before_at = &caps[1];
        let after_at = &caps[2];

        if before_at.contains(':') {
            warnings.push(USER_PASSWORD.to_string());
        } else {
            // '@' used to push the real host out of sight
            warnings.push(format!(
                "'@' character detected, it appears to hide the real domain:\n{}",
                after_at
            ));
            warnings.push(format!("Scanned URL:\n{}", url));
        }
    }

    fn check_redirect_param(&self, url: &str, warnings: &mut WarningList) {
        if let Some(caps) = self.redirect_param.captures(url) {
            let target = percent_decode(&caps[1]);
            warnings.push(format!("Redirects to: {}", target));
        }
    }

    fn check_encoded_characters(&self, url: &str, warnings: &mut WarningList) {
        if self.percent_escape.is_match(url) {
            warnings.push(ENCODED_CHARACTERS.to_string());
        }
    }

    async fn check_shortener(&self, url: &str, parsed: &Url, warnings: &mut WarningList) {
        let Some(host) = parsed.host_str() else {
            return;
        };
        if !is_shortener_host(host) {
            return;
        }

        debug!("Shortened link on {}, expanding", host);
        let Some(resolved) = self.resolver.resolve(url).await else {
            return;
        };

        if resolved != url {
            warnings.push(format!(
                "Shortened link detected, redirects to:\n{}",
                resolved
            ));
        }
    }

    fn check_transport(&self, parsed: &Url, warnings: &mut WarningList) {
        if !parsed.scheme().starts_with("https") {
            warnings.push(INSECURE_CONNECTION.to_string());
        }
    }
}

/// Percent-decode a query value. Escapes that do not form valid UTF-8 are
/// replaced rather than rejected.
fn percent_decode(value: &str) -> Cow<'_, str> {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded,
        Err(_) => {
            let bytes = urlencoding::decode_binary(value.as_bytes());
            Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
