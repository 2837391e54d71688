use qr_guard_memory::ContentType;
use url::Url;

const WIFI_PREFIX: &str = "WIFI:";
const VCARD_PREFIX: &str = "BEGIN:VCARD";

/// Determine the semantic type of a decoded payload. First match wins:
/// WiFi prefix, then vCard prefix, then an http(s) URL, else plain text.
pub fn classify(raw: &str) -> ContentType {
    if raw.starts_with(WIFI_PREFIX) {
        return ContentType::WifiConfig;
    }
    if raw.starts_with(VCARD_PREFIX) {
        return ContentType::Contact;
    }

    match Url::parse(raw) {
        Ok(url) if url.scheme().starts_with("http") => ContentType::Link,
        _ => ContentType::Text,
    }
}
