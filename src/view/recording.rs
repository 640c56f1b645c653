use std::sync::Mutex;

use super::View;
use crate::loader::ContentRef;

/// One instruction received by a [`RecordingView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    LoadingIndicator(bool),
    RenderContent(ContentRef),
    ActionControl(bool),
    OutroTransition,
    RestyleActionControl,
}

/// A view that only remembers what it was told, in order.
#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// How many times `call` was received.
    pub fn count(&self, call: &ViewCall) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    fn record(&self, call: ViewCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl View for RecordingView {
    fn set_loading_indicator(&self, visible: bool) {
        self.record(ViewCall::LoadingIndicator(visible));
    }

    fn render_content(&self, content: &ContentRef) {
        self.record(ViewCall::RenderContent(content.clone()));
    }

    fn enable_action_control(&self, enabled: bool) {
        self.record(ViewCall::ActionControl(enabled));
    }

    fn play_outro_transition(&self) {
        self.record(ViewCall::OutroTransition);
    }

    fn restyle_action_control(&self) {
        self.record(ViewCall::RestyleActionControl);
    }
}
