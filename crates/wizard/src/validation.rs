//! Validation Engine — pure per-page gates over the wizard state.
//!
//! Each gate returns an ordered field→message error map; a non-empty map
//! blocks the forward transition. The scroll-to-first-error side effect is a
//! subscriber concern (the session emits a wizard event); nothing here touches
//! the UI.

use serde::Serialize;

use journey_core::types::StepType;

use crate::state::WizardState;

/// Wizard pages in order. Forward navigation is gated; backward is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPage {
    Basics,
    Flow,
    Messages,
    Timing,
    Settings,
    Review,
}

impl WizardPage {
    pub const ALL: [WizardPage; 6] = [
        WizardPage::Basics,
        WizardPage::Flow,
        WizardPage::Messages,
        WizardPage::Timing,
        WizardPage::Settings,
        WizardPage::Review,
    ];

    pub fn next(self) -> Option<Self> {
        match self {
            WizardPage::Basics => Some(WizardPage::Flow),
            WizardPage::Flow => Some(WizardPage::Messages),
            WizardPage::Messages => Some(WizardPage::Timing),
            WizardPage::Timing => Some(WizardPage::Settings),
            WizardPage::Settings => Some(WizardPage::Review),
            WizardPage::Review => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            WizardPage::Basics => None,
            WizardPage::Flow => Some(WizardPage::Basics),
            WizardPage::Messages => Some(WizardPage::Flow),
            WizardPage::Timing => Some(WizardPage::Messages),
            WizardPage::Settings => Some(WizardPage::Timing),
            WizardPage::Review => Some(WizardPage::Settings),
        }
    }
}

/// One failing field with its operator-facing message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field→message error map in page order. Empty means the gate passed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    entries: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The first failing field, in page order. Drives scroll-to-error.
    pub fn first(&self) -> Option<&FieldError> {
        self.entries.first()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.iter()
    }

    fn merge(&mut self, other: ValidationErrors) {
        self.entries.extend(other.entries);
    }
}

/// Gate for a single page.
pub fn validate_page(page: WizardPage, state: &WizardState) -> ValidationErrors {
    match page {
        WizardPage::Basics => validate_basics(state),
        WizardPage::Flow => validate_flow(state),
        // Empty templates and default timings are valid by design; the
        // operator can finish them later.
        WizardPage::Messages | WizardPage::Timing | WizardPage::Settings | WizardPage::Review => {
            ValidationErrors::default()
        }
    }
}

/// Run every page gate. Used as the terminal gate before submission.
pub fn validate_all(state: &WizardState) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for page in WizardPage::ALL {
        errors.merge(validate_page(page, state));
    }
    errors
}

fn validate_basics(state: &WizardState) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if state.name.trim().is_empty() {
        errors.push("name", "Give this journey a name");
    }
    if state.trigger.crm().is_none() && !state.trigger.manual_enroll() {
        errors.push(
            "trigger",
            "Select a CRM trigger or enable manual enrollment",
        );
    }
    if state.trigger.crm().is_some() && state.trigger.selected_events().is_empty() {
        errors.push("trigger_events", "Select at least one trigger event");
    }
    errors
}

fn validate_flow(state: &WizardState) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    let non_trigger: Vec<_> = state
        .steps
        .iter()
        .filter(|s| s.step_type != StepType::Trigger)
        .collect();

    if non_trigger.is_empty() {
        errors.push("steps", "Add at least one step to the journey");
    } else if !non_trigger.iter().any(|s| s.step_type.is_communication()) {
        errors.push("steps", "Add at least one email or SMS step");
    }
    errors
}
