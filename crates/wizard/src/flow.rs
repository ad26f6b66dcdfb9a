//! Flow Model — invariant-preserving operations over the ordered step list.
//!
//! Every operation is pure: it returns a new list instead of mutating its
//! input. The invariant is that exactly one trigger step exists and it sits
//! at position 0; `normalize` establishes it and the other operations cannot
//! break it.

use tracing::warn;
use uuid::Uuid;

use journey_core::types::{Step, StepType};

/// Direction for [`move_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Ensure the list starts with exactly one trigger step. If the first element
/// is already a trigger it is kept; otherwise a fresh trigger is prepended.
/// Triggers anywhere else in the list are stripped. Idempotent.
pub fn normalize(steps: &[Step]) -> Vec<Step> {
    let keeps_first = steps
        .first()
        .map(|s| s.step_type == StepType::Trigger)
        .unwrap_or(false);

    let mut out = Vec::with_capacity(steps.len() + 1);
    if keeps_first {
        out.push(steps[0].clone());
    } else {
        out.push(Step::trigger());
    }

    let rest = if keeps_first { &steps[1..] } else { steps };
    out.extend(
        rest.iter()
            .filter(|s| s.step_type != StepType::Trigger)
            .cloned(),
    );
    out
}

/// Insert a non-trigger step at `index` (clamped to the list length).
/// Inserting at 0 is allowed; the follow-up `normalize` restores the trigger
/// to position 0. Trigger-typed steps are refused.
pub fn insert(steps: &[Step], step: Step, index: usize) -> Vec<Step> {
    if step.step_type == StepType::Trigger {
        warn!(step_id = %step.id, "Refusing to insert a second trigger step");
        return steps.to_vec();
    }
    let mut out = steps.to_vec();
    let index = index.min(out.len());
    out.insert(index, step);
    out
}

/// Remove the step with the given id. Removing the trigger is a no-op.
pub fn remove(steps: &[Step], id: Uuid) -> Vec<Step> {
    steps
        .iter()
        .filter(|s| s.id != id || s.step_type == StepType::Trigger)
        .cloned()
        .collect()
}

/// Swap the step with its adjacent neighbor in the requested direction.
/// No-op at the list boundaries and whenever the swap would displace the
/// trigger from position 0.
pub fn move_step(steps: &[Step], id: Uuid, direction: MoveDirection) -> Vec<Step> {
    let Some(pos) = steps.iter().position(|s| s.id == id) else {
        return steps.to_vec();
    };

    let target = match direction {
        MoveDirection::Up if pos > 0 => pos - 1,
        MoveDirection::Down if pos + 1 < steps.len() => pos + 1,
        _ => return steps.to_vec(),
    };

    if steps[pos].step_type == StepType::Trigger || steps[target].step_type == StepType::Trigger {
        return steps.to_vec();
    }

    let mut out = steps.to_vec();
    out.swap(pos, target);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey_core::types::{Timing, TimingUnit};

    fn wait_step() -> Step {
        Step::wait(Timing {
            value: 1.0,
            unit: TimingUnit::Days,
        })
    }

    #[test]
    fn test_normalize_empty_list_gets_a_trigger() {
        let steps = normalize(&[]);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].step_type, StepType::Trigger);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let input = vec![Step::email("review_request"), wait_step(), Step::trigger()];
        let once = normalize(&input);
        let twice = normalize(&once);
        assert_eq!(once, twice);
        assert_eq!(once[0].step_type, StepType::Trigger);
        // The stray trigger from the input was stripped.
        assert_eq!(
            once.iter()
                .filter(|s| s.step_type == StepType::Trigger)
                .count(),
            1
        );
    }

    #[test]
    fn test_normalize_keeps_existing_leading_trigger() {
        let trigger = Step::trigger();
        let trigger_id = trigger.id;
        let steps = normalize(&[trigger, Step::sms("thank_you")]);
        assert_eq!(steps[0].id, trigger_id);
    }

    #[test]
    fn test_insert_at_zero_then_normalize_restores_trigger() {
        let steps = normalize(&[]);
        let email = Step::email("review_request");
        let email_id = email.id;
        let steps = normalize(&insert(&steps, email, 0));
        assert_eq!(steps[0].step_type, StepType::Trigger);
        assert_eq!(steps[1].id, email_id);
    }

    #[test]
    fn test_insert_refuses_second_trigger() {
        let steps = normalize(&[]);
        let steps = insert(&steps, Step::trigger(), 1);
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn test_remove_trigger_is_a_noop() {
        let steps = normalize(&[Step::email("review_request")]);
        let trigger_id = steps[0].id;
        let after = remove(&steps, trigger_id);
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].step_type, StepType::Trigger);
        assert_eq!(after[0].id, trigger_id);
    }

    #[test]
    fn test_remove_non_trigger_step() {
        let email = Step::email("review_request");
        let email_id = email.id;
        let steps = normalize(&[email, wait_step()]);
        let after = remove(&steps, email_id);
        assert_eq!(after.len(), 2);
        assert!(after.iter().all(|s| s.id != email_id));
    }

    #[test]
    fn test_move_swaps_neighbors() {
        let email = Step::email("review_request");
        let sms = Step::sms("follow_up");
        let email_id = email.id;
        let sms_id = sms.id;
        let steps = normalize(&[email, sms]);

        let moved = move_step(&steps, sms_id, MoveDirection::Up);
        assert_eq!(moved[1].id, sms_id);
        assert_eq!(moved[2].id, email_id);
    }

    #[test]
    fn test_move_is_noop_at_boundaries() {
        let email = Step::email("review_request");
        let email_id = email.id;
        let steps = normalize(&[email]);

        // Up would displace the trigger; down runs off the end.
        assert_eq!(move_step(&steps, email_id, MoveDirection::Up), steps);
        assert_eq!(move_step(&steps, email_id, MoveDirection::Down), steps);
    }

    #[test]
    fn test_move_unknown_id_is_noop() {
        let steps = normalize(&[Step::email("review_request")]);
        assert_eq!(move_step(&steps, Uuid::new_v4(), MoveDirection::Down), steps);
    }
}
