//! Scan intake: classification of decoded QR payloads and the per-session
//! lock state machine that turns one scan into a record and an action decision.

pub mod classifier;
pub mod controller;
pub mod types;

pub use classifier::classify;
pub use controller::ScanIntakeController;
pub use types::*;

pub use qr_guard_memory::{BoundedHistory, ContentType, HistoryStore, ScanRecord};
pub use qr_guard_policy::{
    DisabledResolver, ShortLinkResolver, UrlSuspicionAnalyzer, WarningList,
    WifiCredentialAnalyzer,
};
