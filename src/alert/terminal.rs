use std::sync::Mutex;
use tracing::debug;

use super::{Alert, AlertPresenter};

/// Prints alerts to stderr and waits for the REPL to report a dismissal.
pub struct TerminalAlertPresenter {
    pending: Mutex<Option<Alert>>,
    interactive: bool,
}

impl Default for TerminalAlertPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalAlertPresenter {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            interactive: true,
        }
    }

    /// For runs that never read input: alerts are printed without the
    /// dismiss hint.
    pub fn non_interactive() -> Self {
        Self {
            pending: Mutex::new(None),
            interactive: false,
        }
    }

    /// Dismiss the alert on screen, if any. Its callback runs before this
    /// returns.
    pub fn dismiss_pending(&self) -> bool {
        let alert = self.pending.lock().unwrap_or_else(|e| e.into_inner()).take();
        match alert {
            Some(alert) => {
                alert.dismiss();
                true
            }
            None => false,
        }
    }
}

/// Box an alert for the terminal.
fn render(alert: &Alert, interactive: bool) -> String {
    let width = alert.title.chars().count().max(alert.message.chars().count()) + 2;
    let rule = "─".repeat(width);
    let pad = |s: &str| format!("{s}{}", " ".repeat(width - 1 - s.chars().count()));
    let mut out = format!(
        "┌{rule}┐\n│ {}│\n├{rule}┤\n│ {}│\n└{rule}┘",
        pad(&alert.title),
        pad(&alert.message),
    );
    if interactive {
        out.push_str("\n  press enter to dismiss");
    }
    out
}

impl AlertPresenter for TerminalAlertPresenter {
    fn show(&self, alert: Alert) {
        eprintln!("\n{}", render(&alert, self.interactive));
        let replaced = self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(alert);
        if let Some(old) = replaced {
            debug!(title = %old.title, "replacing undismissed alert");
        }
    }
}
