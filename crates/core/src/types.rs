use qr_guard_memory::{ContentType, ScanRecord};

/// Lock state of a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyPayload,
    /// A previous scan is still pending.
    Locked,
}

/// Result of handing one decoded string to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Ignored(IgnoreReason),
    Processed {
        record: ScanRecord,
        decision: ActionDecision,
    },
}

/// What the presentation layer should do with an accepted scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionDecision {
    /// No warnings: act immediately without asking.
    AutoProceed {
        content_type: ContentType,
        payload: String,
    },
    /// Warnings found: ask the user before acting.
    ConfirmThenProceed {
        content_type: ContentType,
        payload: String,
        warnings: Vec<String>,
    },
    /// Recorded only. Contacts and plain text have no automatic action.
    RecordOnly { content_type: ContentType },
}

impl ActionDecision {
    pub fn for_scan(content_type: ContentType, payload: &str, warnings: Vec<String>) -> Self {
        match content_type {
            ContentType::Contact | ContentType::Text => ActionDecision::RecordOnly { content_type },
            _ if warnings.is_empty() => ActionDecision::AutoProceed {
                content_type,
                payload: payload.to_string(),
            },
            _ => ActionDecision::ConfirmThenProceed {
                content_type,
                payload: payload.to_string(),
                warnings,
            },
        }
    }

    pub fn requires_confirmation(&self) -> bool {
        matches!(self, ActionDecision::ConfirmThenProceed { .. })
    }

    /// The action carried out once the decision is allowed to proceed.
    pub fn proceed_action(&self) -> Option<ProceedAction> {
        match self {
            ActionDecision::AutoProceed {
                content_type,
                payload,
            }
            | ActionDecision::ConfirmThenProceed {
                content_type,
                payload,
                ..
            } => ProceedAction::for_content(*content_type, payload),
            ActionDecision::RecordOnly { .. } => None,
        }
    }
}

/// The user's answer to a confirm/cancel prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChoice {
    Cancel,
    ContinueAnyway,
}

/// Type-appropriate action for a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProceedAction {
    OpenLink(String),
    /// Informational only. Networks are never joined automatically.
    WifiNotice(String),
}

impl ProceedAction {
    pub fn for_content(content_type: ContentType, payload: &str) -> Option<Self> {
        match content_type {
            ContentType::Link => Some(ProceedAction::OpenLink(payload.to_string())),
            ContentType::WifiConfig => Some(ProceedAction::WifiNotice(payload.to_string())),
            ContentType::Contact | ContentType::Text => None,
        }
    }
}
