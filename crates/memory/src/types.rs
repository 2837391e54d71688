use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a decoded QR payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Link,
    #[serde(rename = "WiFi")]
    WifiConfig,
    Contact,
    Text,
}

impl ContentType {
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Link => "Link",
            ContentType::WifiConfig => "WiFi",
            ContentType::Contact => "Contact",
            ContentType::Text => "Text",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One accepted scan. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    payload: String,
    content_type: ContentType,
    warnings: Vec<String>,
    timestamp: DateTime<Local>,
}

impl ScanRecord {
    pub fn new(payload: impl Into<String>, content_type: ContentType, warnings: Vec<String>) -> Self {
        Self::with_timestamp(payload, content_type, warnings, Local::now())
    }

    pub fn with_timestamp(
        payload: impl Into<String>,
        content_type: ContentType,
        warnings: Vec<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            payload: payload.into(),
            content_type,
            warnings,
            timestamp,
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn display_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// No analyzer finding. Also true for types that are never analyzed.
    pub fn is_safe(&self) -> bool {
        self.warnings.is_empty()
    }
}
