//! Content-safety heuristics for decoded QR payloads.
//!
//! Every check is advisory: analyzers return human-readable warnings and
//! never fail. Malformed input simply produces fewer findings.

pub mod shortener;
pub mod url_analyzer;
pub mod wifi_analyzer;

pub use shortener::{is_shortener_host, DisabledResolver, ShortLinkResolver, KNOWN_SHORTENERS};
pub use url_analyzer::UrlSuspicionAnalyzer;
pub use wifi_analyzer::{WifiCredentialAnalyzer, WifiCredentials};

/// Ordered warnings from one analyzer run. Empty means nothing was found.
pub type WarningList = Vec<String>;
