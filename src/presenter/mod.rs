//! The screen controller: mediates between a [`View`], a [`Loader`] and an
//! [`AlertPresenter`], and remembers the last answer.
//!
//! Entry points ([`LoadController::on_user_action`],
//! [`LoadController::on_appear_load`]) and the alert retry all funnel into
//! one load routine. The loader runs on a spawned task; its result is posted
//! back onto the [`UiContext`] before any state or view is touched. The
//! retry is posted there too, whichever thread dismisses the alert.
//!
//! Only the most recently started load counts. Starting a new one aborts the
//! previous loader task, and any result that still arrives from it is
//! dropped.

mod casing;

pub use casing::title_case;

use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::alert::{Alert, AlertPresenter};
use crate::error::AppError;
use crate::events::{Event, EventBus};
use crate::loader::{ContentResult, Loader};
use crate::ui::UiContext;
use crate::view::View;

/// Where the current load cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    /// The last load failed and its alert has not been dismissed yet.
    AwaitingDismissal,
}

pub struct LoadController {
    view: Weak<dyn View>,
    loader: Arc<dyn Loader>,
    alerts: Arc<dyn AlertPresenter>,
    ui: UiContext,
    events: Option<Arc<EventBus>>,
    current_answer: Mutex<Option<String>>,
    phase: Mutex<LoadPhase>,
    generation: AtomicU64,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    this: Weak<LoadController>,
}

impl LoadController {
    /// The controller never keeps `view` alive; once its owner drops it,
    /// pending completions become no-ops.
    pub fn new(
        view: Weak<dyn View>,
        loader: Arc<dyn Loader>,
        alerts: Arc<dyn AlertPresenter>,
        ui: UiContext,
    ) -> Arc<Self> {
        Self::build(view, loader, alerts, ui, None)
    }

    /// Like [`LoadController::new`], also publishing [`Event`]s on `events`.
    pub fn with_events(
        view: Weak<dyn View>,
        loader: Arc<dyn Loader>,
        alerts: Arc<dyn AlertPresenter>,
        ui: UiContext,
        events: Arc<EventBus>,
    ) -> Arc<Self> {
        Self::build(view, loader, alerts, ui, Some(events))
    }

    fn build(
        view: Weak<dyn View>,
        loader: Arc<dyn Loader>,
        alerts: Arc<dyn AlertPresenter>,
        ui: UiContext,
        events: Option<Arc<EventBus>>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            view,
            loader,
            alerts,
            ui,
            events,
            current_answer: Mutex::new(None),
            phase: Mutex::new(LoadPhase::Idle),
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
            this: this.clone(),
        })
    }

    /// The user pressed the action control.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_user_action(&self) {
        if let Some(view) = self.view.upgrade() {
            view.restyle_action_control();
            view.play_outro_transition();
            view.enable_action_control(false);
        }
        self.perform_load();
    }

    /// The screen appeared; load without the tap transition.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_appear_load(&self) {
        self.perform_load();
    }

    /// Current answer in title case (`"PENDING"` -> `"Pending"`).
    pub fn formatted_answer(&self) -> Option<String> {
        lock(&self.current_answer).as_deref().map(title_case)
    }

    /// Current answer fully lower-cased.
    pub fn normalized_answer(&self) -> Option<String> {
        lock(&self.current_answer).as_deref().map(str::to_lowercase)
    }

    /// Current answer exactly as the loader returned it.
    pub fn current_answer(&self) -> Option<String> {
        lock(&self.current_answer).clone()
    }

    pub fn phase(&self) -> LoadPhase {
        *lock(&self.phase)
    }

    /// Overwrite the current answer directly. Test support only.
    #[cfg(any(test, feature = "test-support"))]
    pub fn set_test_answer(&self, answer: Option<&str>) {
        *lock(&self.current_answer) = answer.map(str::to_string);
    }

    fn perform_load(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *lock(&self.phase) = LoadPhase::Loading;

        if let Some(view) = self.view.upgrade() {
            view.set_loading_indicator(true);
        }
        self.emit(Event::LoadStarted);
        info!(generation, "load started");

        let loader = Arc::clone(&self.loader);
        let ui = self.ui.clone();
        let this = self.this.clone();
        let task = tokio::spawn(async move {
            let result = loader.load().await;
            ui.post(move || match this.upgrade() {
                Some(controller) => controller.complete(generation, result),
                None => debug!(generation, "controller dropped before load completed"),
            });
        });

        if let Some(previous) = lock(&self.in_flight).replace(task) {
            debug!(generation, "superseding in-flight load");
            previous.abort();
        }
    }

    /// Runs on the UI context.
    fn complete(&self, generation: u64, result: Result<ContentResult>) {
        if generation != self.generation.load(Ordering::SeqCst) {
            debug!(generation, "dropping superseded load result");
            return;
        }
        lock(&self.in_flight).take();

        let Some(view) = self.view.upgrade() else {
            debug!(generation, "view gone, skipping load completion");
            *lock(&self.phase) = LoadPhase::Idle;
            return;
        };

        match result {
            Ok(content) => {
                info!(generation, answer = %content.answer, forced = content.forced, "load succeeded");
                *lock(&self.current_answer) = Some(content.answer.clone());
                view.render_content(&content.content);
                view.set_loading_indicator(false);
                *lock(&self.phase) = LoadPhase::Idle;
                self.emit(Event::AnswerChanged {
                    answer: content.answer,
                    forced: content.forced,
                });
            }
            Err(error) => {
                view.set_loading_indicator(false);
                drop(view);
                self.handle_failure(error);
            }
        }
    }

    fn handle_failure(&self, error: anyhow::Error) {
        let app_error = AppError::from_failure(&error);
        warn!(error = %format!("{error:#}"), mapped = ?app_error, "load failed");

        *lock(&self.phase) = LoadPhase::AwaitingDismissal;
        self.emit(Event::LoadFailed {
            error: app_error.clone(),
        });

        // Presenters may dismiss from any thread; the retry belongs on the UI context.
        let this = self.this.clone();
        let ui = self.ui.clone();
        let alert = Alert::for_error(app_error, move || {
            ui.post(move || match this.upgrade() {
                Some(controller) => controller.perform_load(),
                None => debug!("controller dropped before alert was dismissed"),
            });
        });
        self.alerts.show(alert);
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}

impl Drop for LoadController {
    fn drop(&mut self) {
        let task = self
            .in_flight
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }
}

/// The guarded values stay consistent even if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::recording::RecordingAlerts;
    use crate::loader::mock::MockLoader;
    use crate::ui;
    use crate::view::recording::RecordingView;

    fn controller(view: &Arc<RecordingView>, results: Vec<Result<ContentResult>>) -> Arc<LoadController> {
        let (ui, _loop) = ui::channel();
        let view: Weak<dyn View> = Arc::downgrade(view) as Weak<dyn View>;
        LoadController::new(
            view,
            Arc::new(MockLoader::new(results)),
            Arc::new(RecordingAlerts::new()),
            ui,
        )
    }

    #[test]
    fn accessors_are_none_without_answer() {
        let view = Arc::new(RecordingView::new());
        let c = controller(&view, vec![]);
        assert_eq!(c.formatted_answer(), None);
        assert_eq!(c.normalized_answer(), None);
        assert_eq!(c.current_answer(), None);
    }

    #[test]
    fn test_answer_drives_accessors() {
        let view = Arc::new(RecordingView::new());
        let c = controller(&view, vec![]);

        c.set_test_answer(Some("MAYBE later"));
        assert_eq!(c.formatted_answer().as_deref(), Some("Maybe Later"));
        assert_eq!(c.normalized_answer().as_deref(), Some("maybe later"));

        c.set_test_answer(None);
        assert_eq!(c.formatted_answer(), None);
    }

    #[test]
    fn empty_answer_is_some_empty() {
        let view = Arc::new(RecordingView::new());
        let c = controller(&view, vec![]);
        c.set_test_answer(Some(""));
        assert_eq!(c.formatted_answer().as_deref(), Some(""));
    }

    #[test]
    fn starts_idle() {
        let view = Arc::new(RecordingView::new());
        assert_eq!(controller(&view, vec![]).phase(), LoadPhase::Idle);
    }

    #[tokio::test]
    async fn stale_generation_is_ignored() {
        let view = Arc::new(RecordingView::new());
        let c = controller(&view, vec![]);
        c.set_test_answer(Some("yes"));

        c.complete(42, Ok(ContentResult::new("x.gif", "no")));
        assert_eq!(c.current_answer().as_deref(), Some("yes"));
        assert!(view.calls().is_empty());
    }
}
