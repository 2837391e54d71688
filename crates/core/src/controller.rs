use crate::classifier::classify;
use crate::types::*;
use parking_lot::Mutex;
use qr_guard_memory::{ContentType, HistoryStore, ScanRecord};
use qr_guard_policy::{ShortLinkResolver, UrlSuspicionAnalyzer, WifiCredentialAnalyzer};
use std::sync::Arc;
use tracing::{debug, info};

/// Orchestrates one scan event: classify, analyze, record, decide.
///
/// The session moves `Idle -> Locked` when a decoded string is accepted and
/// only returns to `Idle` on a cancelled confirmation or an explicit
/// [`resume`](Self::resume). Repeated reads of the same physical code while
/// locked are dropped.
pub struct ScanIntakeController {
    url_analyzer: UrlSuspicionAnalyzer,
    wifi_analyzer: WifiCredentialAnalyzer,
    history: Arc<dyn HistoryStore>,
    state: Mutex<SessionState>,
}

impl ScanIntakeController {
    pub fn new(resolver: Arc<dyn ShortLinkResolver>, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            url_analyzer: UrlSuspicionAnalyzer::new(resolver),
            wifi_analyzer: WifiCredentialAnalyzer::new(),
            history,
            state: Mutex::new(SessionState::Idle),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    pub async fn on_decoded(&self, raw: &str) -> ScanOutcome {
        if raw.is_empty() {
            return ScanOutcome::Ignored(IgnoreReason::EmptyPayload);
        }
        if !self.try_lock() {
            debug!("Session locked, dropping repeated read");
            return ScanOutcome::Ignored(IgnoreReason::Locked);
        }

        let content_type = classify(raw);
        debug!("Classified scan as {}", content_type);

        let warnings = match content_type {
            ContentType::Link => self.url_analyzer.analyze(raw).await,
            ContentType::WifiConfig => self.wifi_analyzer.analyze(raw),
            ContentType::Contact | ContentType::Text => Vec::new(),
        };

        let record = ScanRecord::new(raw, content_type, warnings.clone());
        self.history.append(record.clone());

        let decision = ActionDecision::for_scan(content_type, raw, warnings);
        info!(
            "Scan recorded: type={} warnings={} confirm={}",
            content_type,
            record.warnings().len(),
            decision.requires_confirmation()
        );

        ScanOutcome::Processed { record, decision }
    }

    /// Apply the user's answer to a confirmation prompt.
    ///
    /// Cancelling re-arms the scanner. Continuing hands back the action and
    /// keeps the session locked until [`resume`](Self::resume) is called.
    pub fn resolve_confirmation(
        &self,
        decision: &ActionDecision,
        choice: UserChoice,
    ) -> Option<ProceedAction> {
        match choice {
            UserChoice::Cancel => {
                info!("Scan cancelled by user");
                self.set_state(SessionState::Idle);
                None
            }
            UserChoice::ContinueAnyway => {
                info!("User chose to continue despite warnings");
                decision.proceed_action()
            }
        }
    }

    /// External lifecycle signal, e.g. the app returning to the foreground.
    pub fn resume(&self) {
        if self.state() == SessionState::Locked {
            debug!("Scanner re-armed");
        }
        self.set_state(SessionState::Idle);
    }

    pub fn history(&self) -> Vec<ScanRecord> {
        self.history.entries()
    }

    fn try_lock(&self) -> bool {
        let mut state = self.state.lock();
        if *state == SessionState::Locked {
            return false;
        }
        *state = SessionState::Locked;
        true
    }

    fn set_state(&self, next: SessionState) {
        *self.state.lock() = next;
    }
}
