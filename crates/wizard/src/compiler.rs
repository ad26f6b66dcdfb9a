//! Sequence Compiler — the one algorithm that turns validated wizard state
//! into the immutable wire payload.
//!
//! All default-filling lives here: the timing default, the fallback message
//! body, and the quiet-hours window are substituted in one place instead of
//! wherever a step happens to be rendered. Compile is pure; it must only run
//! after every page gate has passed and it does not re-validate. An invariant
//! violation at this point is a programmer error, not a recoverable
//! condition.

use tracing::debug;

use journey_core::config::WizardConfig;
use journey_core::types::{
    CompiledStep, SequencePayload, SequenceStatus, StepKind, StepType, Timing,
};
use journey_delivery::QuietWindow;

use crate::flow;
use crate::message;
use crate::state::WizardState;
use crate::templates::TemplateLibrary;
use crate::timing;

/// Compile the wizard state into a sequence payload.
pub fn compile(
    state: &WizardState,
    library: &TemplateLibrary,
    config: &WizardConfig,
) -> SequencePayload {
    let steps = flow::normalize(&state.steps);
    assert!(
        steps.first().map(|s| s.step_type) == Some(StepType::Trigger),
        "normalized flow must start with a trigger step"
    );

    let default_timing = Timing {
        value: config.default_wait_value,
        unit: config.default_wait_unit,
    };

    let mut compiled = Vec::with_capacity(steps.len() - 1);
    for (offset, step) in steps.iter().skip(1).enumerate() {
        let kind = match step.step_type {
            StepType::Wait => StepKind::Wait,
            StepType::SendEmail => StepKind::SendEmail,
            StepType::SendSms => StepKind::SendSms,
            StepType::Trigger => unreachable!("normalize strips non-leading triggers"),
        };

        let wait_ms = timing::resolve_wait_ms(step, &state.timing_overrides, default_timing);

        let (message_purpose, message_config) = if step.step_type.is_communication() {
            (
                Some(step.message.purpose_key().to_string()),
                Some(message::resolve(step, library, &config.fallback_body)),
            )
        } else {
            (None, None)
        };

        compiled.push(CompiledStep {
            kind,
            step_index: (offset + 1) as u32,
            wait_ms,
            config: step.config.clone(),
            message_purpose,
            message_config,
        });
    }

    let descriptor = state.trigger.compile();
    let (quiet_hours_start, quiet_hours_end) = QuietWindow::normalize_or_default(
        &state.quiet_hours_start,
        &state.quiet_hours_end,
        &config.quiet_hours_start,
        &config.quiet_hours_end,
    );

    debug!(
        steps = compiled.len(),
        trigger = descriptor.trigger_type.as_deref().unwrap_or("none"),
        "Compiled sequence payload"
    );

    SequencePayload {
        name: state.name.trim().to_string(),
        description: state.description.clone(),
        trigger_type: descriptor.trigger_type,
        trigger_event_type: descriptor.trigger_event_type,
        allow_manual_enroll: state.trigger.manual_enroll(),
        quiet_hours_start,
        quiet_hours_end,
        stop_if_review: state.stop_if_review,
        status: SequenceStatus::Active,
        steps: compiled,
    }
}
