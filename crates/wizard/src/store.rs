//! Persistence seam and the submission session.
//!
//! The compiled payload crosses exactly one boundary: a single
//! [`SequenceStore::create`] call. No retry loop — a store failure is surfaced
//! unchanged and the operator resubmits explicitly. The session guards against
//! re-entrant submission with a simple in-flight flag; there is exactly one
//! writer, so no further concurrency control is needed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use journey_core::config::WizardConfig;
use journey_core::events::{noop_sink, WizardEvent, WizardEventSink};
use journey_core::types::{CreatedSequence, SequencePayload};
use journey_core::{JourneyError, JourneyResult};

use crate::compiler;
use crate::state::WizardState;
use crate::templates::TemplateLibrary;
use crate::validation::{self, ValidationErrors, WizardPage};

/// The persistence API the wizard hands its compiled payload to.
pub trait SequenceStore: Send + Sync {
    fn create(&self, payload: &SequencePayload) -> JourneyResult<CreatedSequence>;
}

/// A stored sequence with its server-side stamps.
#[derive(Debug, Clone)]
pub struct StoredSequence {
    pub id: Uuid,
    pub payload: SequencePayload,
    pub created_at: DateTime<Utc>,
}

/// In-memory store for the demo binary and tests.
#[derive(Default)]
pub struct InMemorySequenceStore {
    sequences: DashMap<Uuid, StoredSequence>,
}

impl InMemorySequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &Uuid) -> Option<StoredSequence> {
        self.sequences.get(id).map(|r| r.clone())
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl SequenceStore for InMemorySequenceStore {
    fn create(&self, payload: &SequencePayload) -> JourneyResult<CreatedSequence> {
        let id = Uuid::new_v4();
        info!(sequence_id = %id, name = %payload.name, steps = payload.steps.len(), "Storing sequence");
        self.sequences.insert(
            id,
            StoredSequence {
                id,
                payload: payload.clone(),
                created_at: Utc::now(),
            },
        );
        Ok(CreatedSequence {
            id,
            status: payload.status,
        })
    }
}

/// Why a submission did not go through.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// One or more page gates still fail; the map is operator-facing data,
    /// not a fault.
    #[error("Submission blocked by validation")]
    Validation(ValidationErrors),

    /// Another submission is already in flight.
    #[error("A submission is already in flight")]
    InFlight,

    /// The persistence seam rejected the payload. Surfaced once, no retry.
    #[error(transparent)]
    Store(#[from] JourneyError),
}

/// One wizard session: the state aggregate, the template catalog, the
/// compile-time defaults, and the two outward seams (store and event sink).
pub struct WizardSession {
    state: WizardState,
    library: TemplateLibrary,
    config: WizardConfig,
    store: Arc<dyn SequenceStore>,
    events: Arc<dyn WizardEventSink>,
    submitting: AtomicBool,
}

impl WizardSession {
    pub fn new(store: Arc<dyn SequenceStore>) -> Self {
        Self {
            state: WizardState::new(),
            library: TemplateLibrary::with_defaults(),
            config: WizardConfig::default(),
            store,
            events: noop_sink(),
            submitting: AtomicBool::new(false),
        }
    }

    /// Attach an event sink for UI side effects.
    pub fn with_event_sink(mut self, sink: Arc<dyn WizardEventSink>) -> Self {
        self.events = sink;
        self
    }

    pub fn with_config(mut self, config: WizardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_library(mut self, library: TemplateLibrary) -> Self {
        self.library = library;
        self
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WizardState {
        &mut self.state
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    /// Gate the current page and move forward.
    pub fn advance(&mut self) -> Result<WizardPage, ValidationErrors> {
        self.state.advance(self.events.as_ref())
    }

    /// Move backward freely.
    pub fn back(&mut self) -> WizardPage {
        self.state.back()
    }

    /// Pure preview of the payload this session would submit.
    pub fn compile(&self) -> SequencePayload {
        compiler::compile(&self.state, &self.library, &self.config)
    }

    /// Terminal action from the Review page: run every page gate once more,
    /// compile, and hand the payload to the store. The store's response (or
    /// error) is returned to the caller unchanged.
    pub fn submit(&self) -> Result<CreatedSequence, SubmitError> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(SubmitError::InFlight);
        }
        let result = self.submit_inner();
        self.submitting.store(false, Ordering::SeqCst);
        result
    }

    fn submit_inner(&self) -> Result<CreatedSequence, SubmitError> {
        let errors = validation::validate_all(&self.state);
        if !errors.is_empty() {
            warn!(errors = errors.len(), "Submission blocked by validation");
            return Err(SubmitError::Validation(errors));
        }

        let payload = self.compile();
        match self.store.create(&payload) {
            Ok(created) => {
                info!(sequence_id = %created.id, "Sequence created");
                self.events.emit(WizardEvent::SequenceCreated {
                    sequence_id: created.id,
                });
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, "Sequence persistence failed");
                self.events.emit(WizardEvent::SubmissionFailed {
                    error: e.to_string(),
                });
                Err(SubmitError::Store(e))
            }
        }
    }
}
