//! A minimal terminal spinner used as the loading indicator.

use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(80);

/// A terminal spinner ticking on its own thread.
///
/// A plain thread rather than a tokio task: the view toggles the indicator
/// from synchronous code, and `stop` has to finish clearing the line before
/// anything else is printed.
///
/// Writes to stderr so it never ends up in piped stdout. Stopping is
/// synchronous: once [`Spinner::stop`] returns the line has been cleared,
/// so the caller can print straight away.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: mpsc::Sender<()>,
}

impl Spinner {
    /// Start a spinner with the given message (e.g. `"consulting the oracle"`).
    pub fn start(message: &str) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let message = message.to_string();

        let handle = std::thread::spawn(move || {
            let mut i = 0;
            loop {
                let frame = FRAMES[i % FRAMES.len()];
                // \r moves to start of line, \x1b[2K clears the line
                eprint!("\x1b[2K\r{frame} {message}");
                let _ = std::io::stderr().flush();

                match cancel_rx.recv_timeout(INTERVAL) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                i += 1;
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Stop the spinner and clear its line.
    pub fn stop(self) {
        let _ = self.cancel.send(());
        let _ = self.handle.join();
    }
}
