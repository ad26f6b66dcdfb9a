//! Trigger Selector — resolves CRM selection, trigger-event selection, and
//! the manual-enrollment toggle into one trigger descriptor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use journey_core::types::{CrmProvider, TriggerDescriptor};

/// In-session trigger state. Events are kept in selection order; the CRM
/// toggle and manual enrollment are independent, so a journey may carry both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerSelection {
    crm: Option<CrmProvider>,
    events: Vec<String>,
    manual_enroll: bool,
}

impl TriggerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn crm(&self) -> Option<CrmProvider> {
        self.crm
    }

    pub fn selected_events(&self) -> &[String] {
        &self.events
    }

    pub fn manual_enroll(&self) -> bool {
        self.manual_enroll
    }

    /// Select a CRM, clearing any events selected for the previous context.
    /// Re-selecting the current CRM deselects it and clears its events.
    pub fn toggle_crm(&mut self, provider: CrmProvider) {
        if self.crm == Some(provider) {
            debug!(crm = provider.wire_id(), "Deselecting CRM trigger");
            self.crm = None;
        } else {
            debug!(crm = provider.wire_id(), "Selecting CRM trigger");
            self.crm = Some(provider);
        }
        self.events.clear();
    }

    /// Toggle a trigger event. Selection order is preserved; the first
    /// selected event becomes the canonical `trigger_event_type`.
    pub fn toggle_event(&mut self, key: &str) {
        if let Some(pos) = self.events.iter().position(|e| e == key) {
            self.events.remove(pos);
        } else {
            self.events.push(key.to_string());
        }
    }

    pub fn set_manual_enroll(&mut self, enabled: bool) {
        self.manual_enroll = enabled;
    }

    /// Resolve the compiled descriptor: the CRM wire id, else `"manual"` when
    /// only manual enrollment is on, else none. Only the first selected event
    /// becomes `trigger_event_type`; the rest survive in `event_ids` only.
    pub fn compile(&self) -> TriggerDescriptor {
        let trigger_type = match (self.crm, self.manual_enroll) {
            (Some(provider), _) => Some(provider.wire_id().to_string()),
            (None, true) => Some("manual".to_string()),
            (None, false) => None,
        };

        TriggerDescriptor {
            trigger_type,
            trigger_event_type: self.events.first().cloned(),
            event_ids: self.events.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reselecting_crm_deselects_and_clears_events() {
        let mut selection = TriggerSelection::new();
        selection.toggle_crm(CrmProvider::Jobber);
        selection.toggle_event("job_completed");
        selection.toggle_event("invoice_paid");
        assert_eq!(selection.selected_events().len(), 2);

        selection.toggle_crm(CrmProvider::Jobber);
        assert_eq!(selection.crm(), None);
        assert!(selection.selected_events().is_empty());
    }

    #[test]
    fn test_switching_crm_clears_old_events() {
        let mut selection = TriggerSelection::new();
        selection.toggle_crm(CrmProvider::Jobber);
        selection.toggle_event("job_completed");

        selection.toggle_crm(CrmProvider::Quickbooks);
        assert_eq!(selection.crm(), Some(CrmProvider::Quickbooks));
        assert!(selection.selected_events().is_empty());
    }

    #[test]
    fn test_event_toggle_preserves_selection_order() {
        let mut selection = TriggerSelection::new();
        selection.toggle_crm(CrmProvider::Jobber);
        selection.toggle_event("visit_completed");
        selection.toggle_event("job_completed");
        selection.toggle_event("visit_completed");
        assert_eq!(selection.selected_events(), ["job_completed"]);
    }

    #[test]
    fn test_compile_prefers_crm_over_manual() {
        let mut selection = TriggerSelection::new();
        selection.toggle_crm(CrmProvider::Jobber);
        selection.set_manual_enroll(true);
        selection.toggle_event("job_completed");
        selection.toggle_event("invoice_paid");

        let descriptor = selection.compile();
        assert_eq!(descriptor.trigger_type.as_deref(), Some("jobber"));
        assert_eq!(
            descriptor.trigger_event_type.as_deref(),
            Some("job_completed")
        );
        // Remaining events stay in-session only.
        assert_eq!(descriptor.event_ids, ["job_completed", "invoice_paid"]);
    }

    #[test]
    fn test_compile_manual_only_and_none() {
        let mut selection = TriggerSelection::new();
        assert_eq!(selection.compile().trigger_type, None);
        assert_eq!(selection.compile().trigger_event_type, None);

        selection.set_manual_enroll(true);
        assert_eq!(selection.compile().trigger_type.as_deref(), Some("manual"));
    }
}
