use async_trait::async_trait;
use qr_guard_core::{ProceedAction, ScanRecord, UserChoice};

/// Discrete events from the scanning surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerEvent {
    /// One decoded payload. Cameras may emit the same code many times.
    Decoded(String),
    /// The app came back to the foreground; the scanner may be re-armed.
    Resumed,
    HistoryRequested,
    Quit,
}

#[async_trait]
pub trait Scanner: Send + Sync {
    /// `None` once the source is exhausted.
    async fn next_event(&self) -> Option<ScannerEvent>;
}

#[async_trait]
pub trait Presenter: Send + Sync {
    /// Blocking confirm/cancel prompt listing the warnings.
    async fn confirm(&self, payload: &str, warnings: &[String]) -> UserChoice;
    async fn perform(&self, action: &ProceedAction);
    async fn show_history(&self, records: &[ScanRecord]);
    async fn show_status(&self, status: &str);
}
