//! The single wizard-session aggregate. All step mutation goes through the
//! pure Flow Model operations, so the step list, the timing-override map, and
//! the trigger selection cannot drift out of sync.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use journey_core::events::{WizardEvent, WizardEventSink};
use journey_core::types::{Step, Timing};

use crate::flow::{self, MoveDirection};
use crate::timing::TimingOverrides;
use crate::trigger::TriggerSelection;
use crate::validation::{self, ValidationErrors, WizardPage};

/// Everything one wizard session holds. Built and mutated in memory,
/// discarded on cancel, compiled exactly once on submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub name: String,
    pub description: String,
    pub steps: Vec<Step>,
    pub timing_overrides: TimingOverrides,
    pub trigger: TriggerSelection,
    pub quiet_hours_start: String,
    pub quiet_hours_end: String,
    pub stop_if_review: bool,
    #[serde(skip, default = "first_page")]
    page: WizardPage,
}

fn first_page() -> WizardPage {
    WizardPage::Basics
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            steps: flow::normalize(&[]),
            timing_overrides: TimingOverrides::new(),
            trigger: TriggerSelection::new(),
            quiet_hours_start: String::new(),
            quiet_hours_end: String::new(),
            stop_if_review: false,
            page: first_page(),
        }
    }

    pub fn page(&self) -> WizardPage {
        self.page
    }

    pub fn append_step(&mut self, step: Step) {
        let index = self.steps.len();
        self.steps = flow::normalize(&flow::insert(&self.steps, step, index));
    }

    pub fn insert_step(&mut self, step: Step, index: usize) {
        self.steps = flow::normalize(&flow::insert(&self.steps, step, index));
    }

    pub fn remove_step(&mut self, id: Uuid) {
        self.steps = flow::normalize(&flow::remove(&self.steps, id));
        // Drop the orphaned override along with the step.
        self.timing_overrides.clear(&id);
    }

    pub fn move_step(&mut self, id: Uuid, direction: MoveDirection) {
        self.steps = flow::normalize(&flow::move_step(&self.steps, id, direction));
    }

    pub fn step(&self, id: Uuid) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn step_mut(&mut self, id: Uuid) -> Option<&mut Step> {
        self.steps.iter_mut().find(|s| s.id == id)
    }

    pub fn override_timing(&mut self, id: Uuid, timing: Timing) {
        self.timing_overrides.set(id, timing);
    }

    pub fn clear_timing_override(&mut self, id: Uuid) {
        self.timing_overrides.clear(&id);
    }

    /// Gate the current page and move forward on success. On failure the page
    /// stays put; a Basics failure additionally emits a scroll-to-error event
    /// for the first failing field.
    pub fn advance(&mut self, sink: &dyn WizardEventSink) -> Result<WizardPage, ValidationErrors> {
        let errors = validation::validate_page(self.page, self);
        if !errors.is_empty() {
            debug!(page = ?self.page, errors = errors.len(), "Page gate blocked");
            if self.page == WizardPage::Basics {
                if let Some(first) = errors.first() {
                    sink.emit(WizardEvent::ScrollToError {
                        field: first.field.clone(),
                    });
                }
            }
            return Err(errors);
        }
        if let Some(next) = self.page.next() {
            self.page = next;
        }
        Ok(self.page)
    }

    /// Move backward freely. Stays on Basics when already there.
    pub fn back(&mut self) -> WizardPage {
        if let Some(previous) = self.page.previous() {
            self.page = previous;
        }
        self.page
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
