//! Feedback message region.
//!
//! `show` makes a message visible and schedules its own hide. Hides are never
//! cancelled, so an earlier timer can hide a newer message.

use std::sync::{Arc, Mutex};
use std::time::Duration;

const DEFAULT_HIDE_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

impl FeedbackKind {
    /// Style classifier applied to the region.
    pub fn class_name(self) -> &'static str {
        match self {
            FeedbackKind::Success => "success",
            FeedbackKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackState {
    pub text: String,
    pub kind: Option<FeedbackKind>,
    pub visible: bool,
    pub scrolled_into_view: bool,
}

#[derive(Debug, Clone)]
pub struct FeedbackRegion {
    state: Arc<Mutex<FeedbackState>>,
    hide_after: Duration,
}

impl Default for FeedbackRegion {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_AFTER)
    }
}

impl FeedbackRegion {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(FeedbackState::default())),
            hide_after,
        }
    }

    /// Display `text` and schedule a hide. Must run inside a tokio runtime.
    pub fn show(&self, text: impl Into<String>, kind: FeedbackKind) {
        let text = text.into();
        match kind {
            FeedbackKind::Success => tracing::info!(text = %text, "Feedback shown"),
            FeedbackKind::Error => tracing::warn!(text = %text, "Feedback shown"),
        }

        if let Ok(mut state) = self.state.lock() {
            state.text = text;
            state.kind = Some(kind);
            state.visible = true;
            state.scrolled_into_view = true;
        }

        let shared = Arc::clone(&self.state);
        let hide_after = self.hide_after;
        tokio::spawn(async move {
            tokio::time::sleep(hide_after).await;
            if let Ok(mut state) = shared.lock() {
                state.visible = false;
            }
        });
    }

    pub fn snapshot(&self) -> FeedbackState {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_default()
    }
}
