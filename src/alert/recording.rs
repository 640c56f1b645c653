use std::sync::Mutex;

use super::{Alert, AlertPresenter};
use crate::error::AppError;

/// Keeps every alert it is shown so tests can inspect and dismiss them.
#[derive(Default)]
pub struct RecordingAlerts {
    shown: Mutex<Vec<AppError>>,
    pending: Mutex<Vec<Alert>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors of every alert shown so far, in order.
    pub fn shown(&self) -> Vec<AppError> {
        self.shown.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Alerts shown but not yet dismissed.
    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Dismiss the oldest pending alert. Returns false if there is none.
    pub fn dismiss_next(&self) -> bool {
        let alert = {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            if pending.is_empty() {
                return false;
            }
            pending.remove(0)
        };
        // Lock released: the callback may show another alert.
        alert.dismiss();
        true
    }
}

impl AlertPresenter for RecordingAlerts {
    fn show(&self, alert: Alert) {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(alert.error.clone());
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(alert);
    }
}
