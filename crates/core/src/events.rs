//! Wizard event bus — trait for surfacing UI side effects from the core.
//!
//! Validation stays pure; subscribers (the rendering layer in production, a
//! capture sink in tests) react to events such as scroll-to-first-error.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A side effect the UI collaborator is expected to act on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum WizardEvent {
    /// A page gate failed; the UI should scroll to the first failing field.
    ScrollToError { field: String },
    /// The persistence seam accepted the compiled sequence.
    SequenceCreated { sequence_id: Uuid },
    /// The persistence seam rejected the submission; the operator must
    /// resubmit explicitly.
    SubmissionFailed { error: String },
}

/// Trait for emitting wizard events toward the UI collaborator.
pub trait WizardEventSink: Send + Sync {
    fn emit(&self, event: WizardEvent);
}

/// No-op sink for tests and headless compilation.
pub struct NoOpSink;

impl WizardEventSink for NoOpSink {
    fn emit(&self, _event: WizardEvent) {}
}

/// In-memory sink that captures events for testing.
#[derive(Default)]
pub struct CaptureSink {
    events: Mutex<Vec<WizardEvent>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<WizardEvent> {
        self.events.lock().expect("event bus mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().expect("event bus mutex poisoned").len()
    }

    pub fn clear(&self) {
        self.events.lock().expect("event bus mutex poisoned").clear();
    }
}

impl WizardEventSink for CaptureSink {
    fn emit(&self, event: WizardEvent) {
        self.events
            .lock()
            .expect("event bus mutex poisoned")
            .push(event);
    }
}

/// Convenience: create a no-op sink for sessions that don't surface UI events.
pub fn noop_sink() -> Arc<dyn WizardEventSink> {
    Arc::new(NoOpSink)
}

/// Convenience: create a capture sink for tests.
pub fn capture_sink() -> Arc<CaptureSink> {
    Arc::new(CaptureSink::new())
}
