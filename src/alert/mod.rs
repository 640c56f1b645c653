//! Error alerts and who shows them.
//!
//! An [`Alert`] is plain data: a title, a message, the error it describes,
//! and a callback to run when the user dismisses it. The presenter decides
//! how it is displayed and when "dismissed" happens.

pub mod recording;
pub mod terminal;

use std::fmt;

use crate::error::AppError;

type DismissFn = Box<dyn FnOnce() + Send + 'static>;

pub struct Alert {
    pub title: String,
    pub message: String,
    pub error: AppError,
    on_dismiss: Option<DismissFn>,
}

impl Alert {
    /// Build the alert for `error`. `on_dismiss` runs at most once, when
    /// [`Alert::dismiss`] is called.
    pub fn for_error(error: AppError, on_dismiss: impl FnOnce() + Send + 'static) -> Self {
        Self {
            title: error.title().to_string(),
            message: error.message(),
            error,
            on_dismiss: Some(Box::new(on_dismiss)),
        }
    }

    /// The user dismissed the alert.
    pub fn dismiss(mut self) {
        if let Some(callback) = self.on_dismiss.take() {
            callback();
        }
    }
}

impl fmt::Debug for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alert")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Puts alerts in front of the user.
pub trait AlertPresenter: Send + Sync {
    fn show(&self, alert: Alert);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn alert_copies_title_and_message_from_error() {
        let alert = Alert::for_error(AppError::Timeout, || {});
        assert_eq!(alert.title, "Timed out");
        assert_eq!(alert.message, AppError::Timeout.message());
        assert_eq!(alert.error, AppError::Timeout);
    }

    #[test]
    fn dismiss_runs_callback_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let alert = Alert::for_error(AppError::Offline, move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        alert.dismiss();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_without_dismiss_skips_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let alert = Alert::for_error(AppError::Offline, move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        drop(alert);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn debug_omits_callback() {
        let alert = Alert::for_error(AppError::InvalidResponse, || {});
        let dbg = format!("{alert:?}");
        assert!(dbg.contains("Garbled answer"));
        assert!(dbg.contains(".."));
    }
}
