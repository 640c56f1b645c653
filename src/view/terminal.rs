use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::warn;

use super::View;
use crate::loader::ContentRef;
use crate::spinner::Spinner;

/// ANSI foreground colours the action prompt cycles through.
const ACCENTS: &[&str] = &["36", "35", "33", "32", "34"];

const RESET: &str = "\x1b[0m";

/// Renders the oracle into a plain terminal.
///
/// The "action control" is the REPL prompt: while disabled, the REPL
/// ignores input. Content is printed as a link and optionally handed to the
/// system viewer.
pub struct TerminalView {
    spinner: Mutex<Option<Spinner>>,
    action_enabled: AtomicBool,
    accent: AtomicUsize,
    open_content: bool,
}

impl TerminalView {
    pub fn new(open_content: bool) -> Self {
        Self {
            spinner: Mutex::new(None),
            action_enabled: AtomicBool::new(true),
            accent: AtomicUsize::new(0),
            open_content,
        }
    }

    /// Whether the user may trigger another question right now.
    pub fn action_enabled(&self) -> bool {
        self.action_enabled.load(Ordering::SeqCst)
    }

    /// The REPL prompt in the current accent colour.
    pub fn prompt(&self) -> String {
        format!("\x1b[{}moracle>{RESET} ", self.accent_code())
    }

    /// Print the answer headline in the current accent colour.
    pub fn print_answer(&self, formatted: &str, forced: bool) {
        let suffix = if forced { " (forced)" } else { "" };
        println!("\n  \x1b[1;{}m{formatted}{RESET}{suffix}", self.accent_code());
    }

    fn accent_code(&self) -> &'static str {
        ACCENTS[self.accent.load(Ordering::SeqCst) % ACCENTS.len()]
    }

    fn stop_spinner(&self) {
        let spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(spinner) = spinner {
            spinner.stop();
        }
    }
}

impl View for TerminalView {
    fn set_loading_indicator(&self, visible: bool) {
        if visible {
            let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
            if slot.is_none() {
                *slot = Some(Spinner::start("consulting the oracle"));
            }
        } else {
            self.stop_spinner();
        }
    }

    fn render_content(&self, content: &ContentRef) {
        // The spinner shares the terminal; clear it before printing.
        self.stop_spinner();
        println!("  \x1b[2m{content}{RESET}");
        if self.open_content {
            if let Err(e) = open::that(content.as_str()) {
                warn!(error = %e, "could not open content in viewer");
            }
        }
        self.action_enabled.store(true, Ordering::SeqCst);
    }

    fn enable_action_control(&self, enabled: bool) {
        self.action_enabled.store(enabled, Ordering::SeqCst);
    }

    fn play_outro_transition(&self) {
        println!("\x1b[2m{}{RESET}", "· ".repeat(20));
    }

    fn restyle_action_control(&self) {
        self.accent.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_control_toggles() {
        let view = TerminalView::new(false);
        assert!(view.action_enabled());
        view.enable_action_control(false);
        assert!(!view.action_enabled());
        view.enable_action_control(true);
        assert!(view.action_enabled());
    }

    #[test]
    fn render_reenables_action_control() {
        let view = TerminalView::new(false);
        view.enable_action_control(false);
        view.render_content(&ContentRef::new("https://yesno.wtf/assets/yes/1.gif"));
        assert!(view.action_enabled());
    }

    #[test]
    fn restyle_rotates_prompt_colour() {
        let view = TerminalView::new(false);
        let before = view.prompt();
        view.restyle_action_control();
        assert_ne!(view.prompt(), before);
    }

    #[test]
    fn restyle_wraps_around() {
        let view = TerminalView::new(false);
        let first = view.prompt();
        for _ in 0..ACCENTS.len() {
            view.restyle_action_control();
        }
        assert_eq!(view.prompt(), first);
    }

    #[test]
    fn loading_indicator_is_idempotent() {
        let view = TerminalView::new(false);
        view.set_loading_indicator(true);
        view.set_loading_indicator(true);
        view.set_loading_indicator(false);
        view.set_loading_indicator(false);
        assert!(view.spinner.lock().unwrap().is_none());
    }
}
