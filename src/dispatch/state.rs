use std::fmt;

/// Lifecycle of one logical request.
///
/// `Initial -> Sent -> {Success | FailedNoRetry | FailedRetrying -> RetrySent -> {Success | Failed}}`
///
/// A failed refresh moves `FailedRetrying` straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Initial,
    Sent,
    Success,
    FailedNoRetry,
    FailedRetrying,
    RetrySent,
    Failed,
}

impl RequestState {
    pub fn on_sent(self) -> Self {
        match self {
            RequestState::Initial => RequestState::Sent,
            RequestState::FailedRetrying => RequestState::RetrySent,
            other => other,
        }
    }

    pub fn on_success(self) -> Self {
        match self {
            RequestState::Sent | RequestState::RetrySent => RequestState::Success,
            other => other,
        }
    }

    /// `recoverable` is only honoured on the first attempt.
    pub fn on_failure(self, recoverable: bool) -> Self {
        match self {
            RequestState::Sent if recoverable => RequestState::FailedRetrying,
            RequestState::Sent => RequestState::FailedNoRetry,
            RequestState::RetrySent => RequestState::Failed,
            other => other,
        }
    }

    pub fn on_refresh_failed(self) -> Self {
        match self {
            RequestState::FailedRetrying => RequestState::Failed,
            other => other,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestState::Success | RequestState::FailedNoRetry | RequestState::Failed
        )
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestState::Initial => write!(f, "initial"),
            RequestState::Sent => write!(f, "sent"),
            RequestState::Success => write!(f, "success"),
            RequestState::FailedNoRetry => write!(f, "failed_no_retry"),
            RequestState::FailedRetrying => write!(f, "failed_retrying"),
            RequestState::RetrySent => write!(f, "retry_sent"),
            RequestState::Failed => write!(f, "failed"),
        }
    }
}
