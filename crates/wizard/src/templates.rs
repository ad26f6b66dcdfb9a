//! Message Template Library — static catalog mapping a purpose key to
//! per-channel default content. Placeholders such as `{{customer_name}}` are
//! passed through verbatim; the execution engine substitutes them at send
//! time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use journey_core::types::{MessageChannel, MessageConfig};

/// Default content for one purpose across channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub purpose: String,
    pub email: Option<MessageConfig>,
    pub sms: Option<MessageConfig>,
}

/// The purpose-keyed template catalog.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: HashMap<String, MessageTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock catalog shipped with the wizard.
    pub fn with_defaults() -> Self {
        let mut library = Self::new();
        library.insert(MessageTemplate {
            purpose: "review_request".to_string(),
            email: Some(MessageConfig {
                subject: Some("How did we do, {{customer_name}}?".to_string()),
                body: "Hi {{customer_name}},\n\nThanks for choosing {{business_name}}! \
                       If you have a minute, we'd love a quick review: {{review_link}}"
                    .to_string(),
            }),
            sms: Some(MessageConfig {
                subject: None,
                body: "Hi {{customer_name}}, thanks for choosing {{business_name}}! \
                       Mind leaving us a quick review? {{review_link}}"
                    .to_string(),
            }),
        });
        library.insert(MessageTemplate {
            purpose: "thank_you".to_string(),
            email: Some(MessageConfig {
                subject: Some("Thank you from {{business_name}}".to_string()),
                body: "Hi {{customer_name}},\n\nThank you for your business! \
                       It was a pleasure working with you."
                    .to_string(),
            }),
            sms: Some(MessageConfig {
                subject: None,
                body: "Thanks for your business, {{customer_name}}! — {{business_name}}"
                    .to_string(),
            }),
        });
        library.insert(MessageTemplate {
            purpose: "follow_up".to_string(),
            email: Some(MessageConfig {
                subject: Some("Checking in, {{customer_name}}".to_string()),
                body: "Hi {{customer_name}},\n\nJust checking in to make sure everything \
                       is still working out. Reply any time if you need us."
                    .to_string(),
            }),
            sms: Some(MessageConfig {
                subject: None,
                body: "Hi {{customer_name}}, just checking in — everything still good? \
                       — {{business_name}}"
                    .to_string(),
            }),
        });
        library.insert(MessageTemplate {
            purpose: "appointment_reminder".to_string(),
            email: Some(MessageConfig {
                subject: Some("Reminder: your appointment with {{business_name}}".to_string()),
                body: "Hi {{customer_name}},\n\nThis is a reminder about your upcoming \
                       appointment on {{appointment_date}}. See you then!"
                    .to_string(),
            }),
            sms: Some(MessageConfig {
                subject: None,
                body: "Reminder: your appointment with {{business_name}} is on \
                       {{appointment_date}}."
                    .to_string(),
            }),
        });
        library.insert(MessageTemplate {
            purpose: "payment_reminder".to_string(),
            email: Some(MessageConfig {
                subject: Some("Invoice reminder from {{business_name}}".to_string()),
                body: "Hi {{customer_name}},\n\nA friendly reminder that invoice \
                       {{invoice_number}} is still open. You can pay here: {{payment_link}}"
                    .to_string(),
            }),
            sms: Some(MessageConfig {
                subject: None,
                body: "Reminder from {{business_name}}: invoice {{invoice_number}} is \
                       still open. Pay here: {{payment_link}}"
                    .to_string(),
            }),
        });
        // "custom" deliberately has no content; the resolver's fallback text
        // covers it.
        library.insert(MessageTemplate {
            purpose: "custom".to_string(),
            email: None,
            sms: None,
        });
        library
    }

    pub fn insert(&mut self, template: MessageTemplate) {
        self.templates.insert(template.purpose.clone(), template);
    }

    pub fn get(&self, purpose: &str) -> Option<&MessageTemplate> {
        self.templates.get(purpose)
    }

    /// Default content for a purpose on a channel, if the catalog has any.
    pub fn content(&self, purpose: &str, channel: MessageChannel) -> Option<&MessageConfig> {
        let template = self.templates.get(purpose)?;
        match channel {
            MessageChannel::Email => template.email.as_ref(),
            MessageChannel::Sms => template.sms.as_ref(),
        }
    }

    /// All catalog purposes, sorted for stable display.
    pub fn purposes(&self) -> Vec<&str> {
        let mut purposes: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        purposes.sort_unstable();
        purposes
    }
}
