//! Message Resolver — produces the final content for a communication step.
//!
//! Resolution order, per field: the operator's explicit override wins
//! verbatim, then the template for the step's purpose and channel, then the
//! literal fallback body. Loading a template into a step is the explicit
//! [`apply_template`] action; changing the purpose alone never overwrites
//! operator-edited content.

use journey_core::types::{MessageChannel, MessageConfig, Step};

use crate::templates::TemplateLibrary;

/// Resolve the content a communication step ships with. Always returns a
/// non-empty body: the fallback covers steps with no override and no catalog
/// content. Subjects only apply to the email channel.
pub fn resolve(step: &Step, library: &TemplateLibrary, fallback_body: &str) -> MessageConfig {
    let channel = step
        .step_type
        .channel()
        .unwrap_or(MessageChannel::Email);
    let template = library.content(step.message.purpose_key(), channel);

    let body = step
        .message
        .body
        .clone()
        .or_else(|| template.map(|t| t.body.clone()))
        .unwrap_or_else(|| fallback_body.to_string());

    let subject = match channel {
        MessageChannel::Email => step
            .message
            .subject
            .clone()
            .or_else(|| template.and_then(|t| t.subject.clone())),
        MessageChannel::Sms => None,
    };

    MessageConfig { subject, body }
}

/// Select a purpose without touching authored content.
pub fn set_purpose(step: &mut Step, purpose: impl Into<String>) {
    step.message.purpose = purpose.into();
}

/// Explicitly load the catalog content for `purpose` into the step,
/// overwriting any authored subject/body. Returns false (leaving the step's
/// content untouched) when the catalog has nothing for that purpose and
/// channel.
pub fn apply_template(step: &mut Step, purpose: &str, library: &TemplateLibrary) -> bool {
    let Some(channel) = step.step_type.channel() else {
        return false;
    };
    step.message.purpose = purpose.to_string();
    match library.content(purpose, channel) {
        Some(content) => {
            step.message.subject = content.subject.clone();
            step.message.body = Some(content.body.clone());
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey_core::types::Step;

    const FALLBACK: &str = "Thank you for your business!";

    #[test]
    fn test_template_default_when_no_override() {
        let library = TemplateLibrary::with_defaults();
        let step = Step::email("review_request");
        let resolved = resolve(&step, &library, FALLBACK);
        let expected = library
            .content("review_request", MessageChannel::Email)
            .unwrap();
        assert_eq!(resolved.subject, expected.subject);
        assert_eq!(resolved.body, expected.body);
    }

    #[test]
    fn test_explicit_body_wins_verbatim() {
        let library = TemplateLibrary::with_defaults();
        let mut step = Step::sms("review_request");
        step.message.body = Some("Custom text".to_string());
        let resolved = resolve(&step, &library, FALLBACK);
        assert_eq!(resolved.body, "Custom text");
        assert_eq!(resolved.subject, None);
    }

    #[test]
    fn test_subject_override_merges_with_template_body() {
        let library = TemplateLibrary::with_defaults();
        let mut step = Step::email("thank_you");
        step.message.subject = Some("A note from us".to_string());
        let resolved = resolve(&step, &library, FALLBACK);
        assert_eq!(resolved.subject.as_deref(), Some("A note from us"));
        let template_body = &library
            .content("thank_you", MessageChannel::Email)
            .unwrap()
            .body;
        assert_eq!(&resolved.body, template_body);
    }

    #[test]
    fn test_fallback_when_no_override_and_no_template() {
        let library = TemplateLibrary::with_defaults();
        let step = Step::sms("custom");
        let resolved = resolve(&step, &library, FALLBACK);
        assert_eq!(resolved.body, FALLBACK);
    }

    #[test]
    fn test_set_purpose_keeps_authored_content() {
        let library = TemplateLibrary::with_defaults();
        let mut step = Step::email("custom");
        step.message.body = Some("Hand-written copy".to_string());

        set_purpose(&mut step, "review_request");
        assert_eq!(step.message.body.as_deref(), Some("Hand-written copy"));

        // The authored body still wins at resolve time.
        let resolved = resolve(&step, &library, FALLBACK);
        assert_eq!(resolved.body, "Hand-written copy");
    }

    #[test]
    fn test_apply_template_overwrites_content() {
        let library = TemplateLibrary::with_defaults();
        let mut step = Step::email("custom");
        step.message.body = Some("Hand-written copy".to_string());

        assert!(apply_template(&mut step, "review_request", &library));
        let expected = library
            .content("review_request", MessageChannel::Email)
            .unwrap();
        assert_eq!(step.message.body.as_deref(), Some(expected.body.as_str()));
        assert_eq!(step.message.subject, expected.subject);
    }

    #[test]
    fn test_apply_template_without_catalog_content_leaves_step_alone() {
        let library = TemplateLibrary::with_defaults();
        let mut step = Step::sms("custom");
        step.message.body = Some("Keep me".to_string());

        assert!(!apply_template(&mut step, "custom", &library));
        assert_eq!(step.message.body.as_deref(), Some("Keep me"));
        // Non-communication steps never take templates.
        let mut wait = Step::new(journey_core::types::StepType::Wait);
        assert!(!apply_template(&mut wait, "review_request", &library));
    }
}
