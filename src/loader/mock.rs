use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{oneshot, watch};

use super::{ContentResult, Loader};

/// A scripted loader for tests. Returns pre-defined results in order.
pub struct MockLoader {
    results: Mutex<VecDeque<Result<ContentResult>>>,
    calls: AtomicUsize,
}

impl MockLoader {
    pub fn new(results: Vec<Result<ContentResult>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `load` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Loader for MockLoader {
    async fn load(&self) -> Result<ContentResult> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.unwrap_or_else(|| {
            Err(anyhow::anyhow!(
                "MockLoader: no more results (called {} times)",
                i + 1
            ))
        })
    }
}

/// A loader whose calls stay pending until the test resolves them.
///
/// Lets tests observe the controller mid-load and decide exactly when
/// (and in which order) completions land.
pub struct ManualLoader {
    pending: Mutex<Vec<Option<oneshot::Sender<Result<ContentResult>>>>>,
    started: watch::Sender<usize>,
}

impl Default for ManualLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualLoader {
    pub fn new() -> Self {
        let (started, _) = watch::channel(0);
        Self {
            pending: Mutex::new(Vec::new()),
            started,
        }
    }

    /// How many calls have started so far.
    pub fn calls(&self) -> usize {
        *self.started.borrow()
    }

    /// Wait until at least `n` calls have started.
    pub async fn wait_for_calls(&self, n: usize) {
        let mut rx = self.started.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|started| *started >= n).await;
    }

    /// Complete call number `index` (0-based). Returns false if that call
    /// was never made, was already resolved, or its caller went away.
    pub fn resolve(&self, index: usize, result: Result<ContentResult>) -> bool {
        let sender = self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(index)
            .and_then(Option::take);
        match sender {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl Loader for ManualLoader {
    async fn load(&self) -> Result<ContentResult> {
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Some(tx));
        self.started.send_modify(|started| *started += 1);

        rx.await
            .map_err(|_| anyhow::anyhow!("ManualLoader: call dropped without a result"))?
    }
}
