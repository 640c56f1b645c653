//! The UI-owning execution context.
//!
//! Everything that touches the view or controller state runs as a job on a
//! single [`UiLoop`], drained by whichever task owns the view. Background
//! work hands its results over with [`UiContext::post`].

use tokio::sync::mpsc;
use tracing::debug;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Create a connected context/loop pair.
pub fn channel() -> (UiContext, UiLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UiContext { tx }, UiLoop { rx })
}

/// Cheap handle for posting jobs onto the UI loop.
#[derive(Clone)]
pub struct UiContext {
    tx: mpsc::UnboundedSender<Job>,
}

impl UiContext {
    /// Queue `job` to run on the UI loop. Returns false (and drops the job)
    /// if the loop has shut down.
    pub fn post(&self, job: impl FnOnce() + Send + 'static) -> bool {
        let sent = self.tx.send(Box::new(job)).is_ok();
        if !sent {
            debug!("ui loop closed, dropping job");
        }
        sent
    }
}

/// The receiving end. Jobs run one at a time, in posting order.
pub struct UiLoop {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl UiLoop {
    /// Wait for the next job and run it. Returns false once every
    /// [`UiContext`] has been dropped and the queue is empty.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run every job that is already queued, without waiting.
    /// Jobs posted by those jobs run too.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}
