use crate::config::Config;
use qr_guard_core::{
    classify, ActionDecision, ContentType, IgnoreReason, ScanIntakeController, ScanOutcome,
    ShortLinkResolver, UrlSuspicionAnalyzer, WarningList, WifiCredentialAnalyzer,
};
use qr_guard_interfaces::{Presenter, Scanner, ScannerEvent};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub processed: usize,
    pub ignored: usize,
    pub cancelled: usize,
}

/// Drive the controller from scanner events until the scanner is exhausted
/// or asks to quit.
pub async fn run_session(
    controller: &ScanIntakeController,
    scanner: &dyn Scanner,
    presenter: &dyn Presenter,
    config: &Config,
) -> SessionSummary {
    let mut summary = SessionSummary::default();

    while let Some(event) = scanner.next_event().await {
        match event {
            ScannerEvent::Decoded(raw) => match controller.on_decoded(&raw).await {
                ScanOutcome::Ignored(reason) => {
                    summary.ignored += 1;
                    if reason == IgnoreReason::Locked {
                        presenter
                            .show_status("Scanner locked by the previous scan, send :resume to re-arm")
                            .await;
                    }
                }
                ScanOutcome::Processed { decision, .. } => {
                    summary.processed += 1;
                    if !handle_decision(controller, presenter, decision).await {
                        summary.cancelled += 1;
                    }
                    // Cancelled scans are already re-armed by the controller
                    if config.rearm_after_action {
                        controller.resume();
                    }
                }
            },
            ScannerEvent::Resumed => controller.resume(),
            ScannerEvent::HistoryRequested => presenter.show_history(&controller.history()).await,
            ScannerEvent::Quit => break,
        }
    }

    info!(
        "Session ended: processed={} ignored={} cancelled={}",
        summary.processed, summary.ignored, summary.cancelled
    );
    summary
}

/// Returns `false` when the user cancelled.
async fn handle_decision(
    controller: &ScanIntakeController,
    presenter: &dyn Presenter,
    decision: ActionDecision,
) -> bool {
    match &decision {
        ActionDecision::AutoProceed { .. } => {
            if let Some(action) = decision.proceed_action() {
                presenter.perform(&action).await;
            }
            true
        }
        ActionDecision::ConfirmThenProceed {
            payload, warnings, ..
        } => {
            let choice = presenter.confirm(payload, warnings).await;
            match controller.resolve_confirmation(&decision, choice) {
                Some(action) => {
                    presenter.perform(&action).await;
                    true
                }
                None => false,
            }
        }
        ActionDecision::RecordOnly { content_type } => {
            debug!("No automatic action for {}", content_type);
            presenter
                .show_status(&format!("{} recorded in history", content_type))
                .await;
            true
        }
    }
}

/// Classify and analyze one payload without recording it.
pub async fn check_payload(
    resolver: Arc<dyn ShortLinkResolver>,
    payload: &str,
) -> (ContentType, WarningList) {
    let content_type = classify(payload);
    let warnings = match content_type {
        ContentType::Link => UrlSuspicionAnalyzer::new(resolver).analyze(payload).await,
        ContentType::WifiConfig => WifiCredentialAnalyzer::new().analyze(payload),
        ContentType::Contact | ContentType::Text => Vec::new(),
    };
    (content_type, warnings)
}
