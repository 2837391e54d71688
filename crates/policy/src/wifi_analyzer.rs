use crate::WarningList;
use regex::Regex;

/// Passwords shorter than this are flagged.
pub const MIN_PASSWORD_LEN: usize = 8;

const WEAK_PASSWORDS: &[&str] = &["12345678", "password", "admin123"];

const NO_PASSWORD: &str = "Network without password, unsecured connections.";
const SHORT_PASSWORD: &str = "Very short WiFi password, unsafe.";
const WEAK_PASSWORD: &str = "Common/weak password, easy to guess.";
const MISSING_SSID: &str = "Missing SSID, code may be malformed.";
const EMBEDDED_LINK: &str = "WiFi QR code also contains a link, may be a disguised attack.";

/// Fields pulled out of a `WIFI:` payload. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: String,
    pub encryption: String,
}

/// Credential-strength and deception checks over a WiFi configuration payload.
pub struct WifiCredentialAnalyzer {
    ssid: Regex,
    password: Regex,
    encryption: Regex,
    free_access: Regex,
    embedded_link: Regex,
}

impl WifiCredentialAnalyzer {
    pub fn new() -> Self {
        Self {
            ssid: Regex::new(r"S:([^;]*)").expect("ssid pattern"),
            password: Regex::new(r"P:([^;]*)").expect("password pattern"),
            encryption: Regex::new(r"T:([^;]*)").expect("encryption pattern"),
            free_access: Regex::new(r"(?i)free|gratis|liber").expect("free-access pattern"),
            embedded_link: Regex::new(r"(?i)https?://").expect("link pattern"),
        }
    }

    pub fn extract(&self, payload: &str) -> WifiCredentials {
        WifiCredentials {
            ssid: first_field(&self.ssid, payload),
            password: first_field(&self.password, payload),
            encryption: first_field(&self.encryption, payload),
        }
    }

    pub fn analyze(&self, payload: &str) -> WarningList {
        let creds = self.extract(payload);
        let mut warnings = Vec::new();

        if creds.encryption.eq_ignore_ascii_case("nopass") {
            warnings.push(NO_PASSWORD.to_string());
        }

        if !creds.password.is_empty() && creds.password.chars().count() < MIN_PASSWORD_LEN {
            warnings.push(SHORT_PASSWORD.to_string());
        }

        let password = creds.password.to_lowercase();
        if WEAK_PASSWORDS.contains(&password.as_str()) {
            warnings.push(WEAK_PASSWORD.to_string());
        }

        if self.free_access.is_match(&creds.ssid) {
            warnings.push(format!(
                "Network name \"{}\" suggests free access, verify authenticity.",
                creds.ssid
            ));
        }

        if creds.ssid.is_empty() {
            warnings.push(MISSING_SSID.to_string());
        }

        if self.embedded_link.is_match(payload) {
            warnings.push(EMBEDDED_LINK.to_string());
        }

        tracing::debug!("WiFi analysis produced {} warning(s)", warnings.len());
        warnings
    }
}

impl Default for WifiCredentialAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn first_field(pattern: &Regex, payload: &str) -> String {
    pattern
        .captures(payload)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_fields() {
        let analyzer = WifiCredentialAnalyzer::new();
        let creds = analyzer.extract("WIFI:S:HomeNet;T:WPA;P:correct-horse;;");
        assert_eq!(creds.ssid, "HomeNet");
        assert_eq!(creds.encryption, "WPA");
        assert_eq!(creds.password, "correct-horse");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let analyzer = WifiCredentialAnalyzer::new();
        assert_eq!(analyzer.extract("WIFI:"), WifiCredentials::default());
    }

    #[test]
    fn test_strong_network_is_clean() {
        let analyzer = WifiCredentialAnalyzer::new();
        assert!(analyzer.analyze("WIFI:S:HomeNet;T:WPA;P:correct-horse;;").is_empty());
    }

    #[test]
    fn test_weak_password_and_missing_ssid() {
        let analyzer = WifiCredentialAnalyzer::new();
        let warnings = analyzer.analyze("WIFI:S:;P:12345678;T:WPA;");
        assert_eq!(
            warnings,
            vec![WEAK_PASSWORD.to_string(), MISSING_SSID.to_string()]
        );
    }

    #[test]
    fn test_open_network() {
        let analyzer = WifiCredentialAnalyzer::new();
        let warnings = analyzer.analyze("WIFI:S:Cafe;T:NOPASS;;");
        assert_eq!(warnings, vec![NO_PASSWORD.to_string()]);
    }

    #[test]
    fn test_short_password() {
        let analyzer = WifiCredentialAnalyzer::new();
        let warnings = analyzer.analyze("WIFI:S:Home;T:WPA;P:abc;;");
        assert_eq!(warnings, vec![SHORT_PASSWORD.to_string()]);
    }

    #[test]
    fn test_weak_password_case_insensitive() {
        let analyzer = WifiCredentialAnalyzer::new();
        let warnings = analyzer.analyze("WIFI:S:Home;T:WPA;P:PassWord;;");
        assert_eq!(warnings, vec![WEAK_PASSWORD.to_string()]);
    }

    #[test]
    fn test_free_ssid_embeds_name() {
        let analyzer = WifiCredentialAnalyzer::new();
        let warnings = analyzer.analyze("WIFI:S:Airport_FREE_WiFi;T:WPA;P:longenough;;");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("\"Airport_FREE_WiFi\""));
    }

    #[test]
    fn test_embedded_link() {
        let analyzer = WifiCredentialAnalyzer::new();
        let warnings = analyzer.analyze("WIFI:S:Home;T:WPA;P:longenough;HTTPS://login.example;");
        assert_eq!(warnings, vec![EMBEDDED_LINK.to_string()]);
    }

    #[test]
    fn test_checks_are_cumulative() {
        let analyzer = WifiCredentialAnalyzer::new();
        let warnings = analyzer.analyze("WIFI:T:nopass;P:admin;S:Gratis;http://x;");
        assert_eq!(warnings.len(), 4);
        assert_eq!(warnings[0], NO_PASSWORD);
        assert_eq!(warnings[1], SHORT_PASSWORD);
        assert!(warnings[2].contains("Gratis"));
        assert_eq!(warnings[3], EMBEDDED_LINK);
    }

    #[test]
    fn test_analysis_is_stable() {
        let analyzer = WifiCredentialAnalyzer::new();
        let payload = "WIFI:S:free;P:password;T:nopass;;";
        assert_eq!(analyzer.analyze(payload), analyzer.analyze(payload));
    }
}
