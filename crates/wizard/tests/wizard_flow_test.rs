//! Integration test for the full wizard flow: build state, walk every page
//! gate, compile, and persist through the in-memory store.

use std::sync::Arc;

use journey_core::events::{capture_sink, WizardEvent};
use journey_core::types::{CrmProvider, MessageChannel, Step, StepKind, Timing, TimingUnit};
use journey_wizard::flow::MoveDirection;
use journey_wizard::validation::WizardPage;
use journey_wizard::{InMemorySequenceStore, WizardSession};

#[test]
fn test_full_wizard_walk_compile_and_persist() {
    let store = Arc::new(InMemorySequenceStore::new());
    let sink = capture_sink();
    let mut session = WizardSession::new(store.clone()).with_event_sink(sink.clone());

    // Basics page: incomplete state blocks Next and scrolls to the first
    // failing field.
    let errors = session.advance().unwrap_err();
    assert!(errors.get("name").is_some());
    assert_eq!(
        sink.events()[0],
        WizardEvent::ScrollToError {
            field: "name".to_string()
        }
    );
    sink.clear();

    let state = session.state_mut();
    state.name = "Post-job review journey".to_string();
    state.description = "Chase a review after every completed job".to_string();
    state.trigger.toggle_crm(CrmProvider::Jobber);
    state.trigger.toggle_event("job_completed");
    state.trigger.set_manual_enroll(true);
    assert_eq!(session.advance().unwrap(), WizardPage::Flow);

    // Flow page: assemble wait → email → wait → sms.
    let state = session.state_mut();
    let first_wait = Step::wait(Timing {
        value: 1.0,
        unit: TimingUnit::Days,
    });
    let email = Step::email("review_request");
    let email_id = email.id;
    let second_wait = Step::wait(Timing {
        value: 3.0,
        unit: TimingUnit::Days,
    });
    let sms = Step::sms("follow_up");
    let sms_id = sms.id;
    state.append_step(first_wait);
    state.append_step(email);
    state.append_step(second_wait);
    state.append_step(sms);

    // Reorder and put it back; the trigger never moves.
    state.move_step(sms_id, MoveDirection::Up);
    state.move_step(sms_id, MoveDirection::Down);
    assert_eq!(state.steps[0].step_type, journey_core::types::StepType::Trigger);

    assert_eq!(session.advance().unwrap(), WizardPage::Messages);

    // Messages page is unconstrained; author the SMS body by hand.
    session
        .state_mut()
        .step_mut(sms_id)
        .unwrap()
        .message
        .body = Some("Quick nudge: {{review_link}}".to_string());
    assert_eq!(session.advance().unwrap(), WizardPage::Timing);

    // Timing page: override the email delay.
    session.state_mut().override_timing(
        email_id,
        Timing {
            value: 36.0,
            unit: TimingUnit::Hours,
        },
    );
    assert_eq!(session.advance().unwrap(), WizardPage::Settings);

    // Settings page: quiet hours and stop-on-review.
    let state = session.state_mut();
    state.quiet_hours_start = "21:00".to_string();
    state.quiet_hours_end = "07:00".to_string();
    state.stop_if_review = true;
    assert_eq!(session.advance().unwrap(), WizardPage::Review);

    // Submit from Review.
    let created = session.submit().unwrap();
    let stored = store.get(&created.id).unwrap();
    let payload = &stored.payload;

    assert_eq!(payload.name, "Post-job review journey");
    assert_eq!(payload.trigger_type.as_deref(), Some("jobber"));
    assert_eq!(payload.trigger_event_type.as_deref(), Some("job_completed"));
    assert!(payload.allow_manual_enroll);
    assert!(payload.stop_if_review);
    assert_eq!(payload.quiet_hours_start, "21:00");
    assert_eq!(payload.quiet_hours_end, "07:00");

    // Four compiled steps, contiguous indices, trigger excluded.
    let kinds: Vec<StepKind> = payload.steps.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        [
            StepKind::Wait,
            StepKind::SendEmail,
            StepKind::Wait,
            StepKind::SendSms
        ]
    );
    let indices: Vec<u32> = payload.steps.iter().map(|s| s.step_index).collect();
    assert_eq!(indices, [1, 2, 3, 4]);

    // Wait delays: step timing for the waits, the override for the email.
    assert_eq!(payload.steps[0].wait_ms, 86_400_000);
    assert_eq!(payload.steps[1].wait_ms, 36 * 3_600_000);
    assert_eq!(payload.steps[2].wait_ms, 3 * 86_400_000);

    // Messages: template default for the email, authored body for the SMS.
    let email_config = payload.steps[1].message_config.as_ref().unwrap();
    let expected = session
        .library()
        .content("review_request", MessageChannel::Email)
        .unwrap();
    assert_eq!(email_config, expected);
    let sms_config = payload.steps[3].message_config.as_ref().unwrap();
    assert_eq!(sms_config.body, "Quick nudge: {{review_link}}");

    // The session emitted exactly one creation event.
    assert_eq!(
        sink.events(),
        [WizardEvent::SequenceCreated {
            sequence_id: created.id
        }]
    );
}

#[test]
fn test_resubmission_after_wizard_edits() {
    let store = Arc::new(InMemorySequenceStore::new());
    let mut session = WizardSession::new(store.clone());

    let state = session.state_mut();
    state.name = "Thank-you note".to_string();
    state.trigger.set_manual_enroll(true);
    state.append_step(Step::sms("thank_you"));

    let first = session.submit().unwrap();

    // Go back, edit, submit again: two independent sequences.
    session.state_mut().name = "Thank-you note v2".to_string();
    let second = session.submit().unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&second.id).unwrap().payload.name, "Thank-you note v2");
}
