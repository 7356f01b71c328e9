use std::time::Duration;

use reqwest::Method;
use tracing::Level;
use tracing::event;

use super::RequestState;

#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub method: Method,
    pub path: String,
    pub state: RequestState,
    pub attempts: u8,
    pub refreshed: bool,
    pub elapsed: Duration,
}

impl DispatchOutcome {
    pub fn success(&self) -> bool {
        self.state == RequestState::Success
    }

    pub fn log(&self) {
        if self.success() {
            event!(
                Level::DEBUG,
                method = %self.method,
                path = %self.path,
                state = %self.state,
                attempts = self.attempts,
                refreshed = self.refreshed,
                elapsed_ms = self.elapsed.as_millis() as u64,
                "request.outcome"
            );
        } else {
            event!(
                Level::INFO,
                method = %self.method,
                path = %self.path,
                state = %self.state,
                attempts = self.attempts,
                refreshed = self.refreshed,
                elapsed_ms = self.elapsed.as_millis() as u64,
                "request.outcome"
            );
        }
    }
}
