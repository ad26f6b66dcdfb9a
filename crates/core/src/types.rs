use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single node in a journey under construction. Step ids are ephemeral and
/// client-scoped; they never survive compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: Uuid,
    pub step_type: StepType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,
    #[serde(default)]
    pub message: MessageSpec,
    #[serde(default = "empty_config")]
    pub config: serde_json::Value,
}

fn empty_config() -> serde_json::Value {
    serde_json::json!({})
}

impl Step {
    pub fn new(step_type: StepType) -> Self {
        Self {
            id: Uuid::new_v4(),
            step_type,
            timing: None,
            message: MessageSpec::default(),
            config: empty_config(),
        }
    }

    pub fn trigger() -> Self {
        Self::new(StepType::Trigger)
    }

    pub fn wait(timing: Timing) -> Self {
        let mut step = Self::new(StepType::Wait);
        step.timing = Some(timing);
        step
    }

    pub fn email(purpose: impl Into<String>) -> Self {
        let mut step = Self::new(StepType::SendEmail);
        step.message.purpose = purpose.into();
        step
    }

    pub fn sms(purpose: impl Into<String>) -> Self {
        let mut step = Self::new(StepType::SendSms);
        step.message.purpose = purpose.into();
        step
    }
}

/// The kind of work a step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Trigger,
    Wait,
    SendEmail,
    SendSms,
}

impl StepType {
    pub fn is_communication(&self) -> bool {
        matches!(self, StepType::SendEmail | StepType::SendSms)
    }

    /// The message channel a communication step ships on, if any.
    pub fn channel(&self) -> Option<MessageChannel> {
        match self {
            StepType::SendEmail => Some(MessageChannel::Email),
            StepType::SendSms => Some(MessageChannel::Sms),
            StepType::Trigger | StepType::Wait => None,
        }
    }
}

/// Channel a message template is authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageChannel {
    Email,
    Sms,
}

/// A declared delay before a step fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub value: f64,
    pub unit: TimingUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingUnit {
    Minutes,
    Hours,
    Days,
}

/// Per-step message intent: a purpose key selecting default template content,
/// plus optional operator-authored overrides that win verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSpec {
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl MessageSpec {
    /// The purpose key, defaulting to `custom` when unset.
    pub fn purpose_key(&self) -> &str {
        if self.purpose.trim().is_empty() {
            "custom"
        } else {
            &self.purpose
        }
    }
}

impl Default for MessageSpec {
    fn default() -> Self {
        Self {
            purpose: "custom".to_string(),
            subject: None,
            body: None,
        }
    }
}

/// Resolved message content attached to a compiled communication step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub body: String,
}

/// Kind of a compiled step. Triggers are stripped during compilation and have
/// no compiled counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Wait,
    SendEmail,
    SendSms,
}

/// One entry of the compiled sequence. `step_index` is 1-based and assigned
/// only to non-trigger steps; communication kinds always carry a resolved
/// `message_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledStep {
    pub kind: StepKind,
    pub step_index: u32,
    pub wait_ms: u64,
    pub config: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_config: Option<MessageConfig>,
}

/// Lifecycle status of a sequence definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceStatus {
    Draft,
    Active,
    Paused,
    Archived,
}

/// The immutable wire payload handed to the persistence seam. Compilation
/// injects no ids or timestamps, so compiling identical wizard state twice
/// yields structurally identical payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencePayload {
    pub name: String,
    pub description: String,
    pub trigger_type: Option<String>,
    pub trigger_event_type: Option<String>,
    pub allow_manual_enroll: bool,
    pub quiet_hours_start: String,
    pub quiet_hours_end: String,
    pub stop_if_review: bool,
    pub status: SequenceStatus,
    pub steps: Vec<CompiledStep>,
}

/// CRM platforms a journey can be triggered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrmProvider {
    Jobber,
    Quickbooks,
    GoogleSheets,
}

impl CrmProvider {
    pub fn wire_id(&self) -> &'static str {
        match self {
            CrmProvider::Jobber => "jobber",
            CrmProvider::Quickbooks => "quickbooks",
            CrmProvider::GoogleSheets => "google_sheets",
        }
    }

    /// Trigger events this CRM can emit, in display order.
    pub fn trigger_events(&self) -> &'static [&'static str] {
        match self {
            CrmProvider::Jobber => &["job_completed", "visit_completed", "invoice_paid"],
            CrmProvider::Quickbooks => &["invoice_paid", "payment_received"],
            CrmProvider::GoogleSheets => &["row_added"],
        }
    }
}

/// Resolved trigger descriptor. The full `event_ids` selection is retained
/// in-session; only the first event reaches the compiled payload (the single
/// `trigger_event_type` column predates multi-event selection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDescriptor {
    pub trigger_type: Option<String>,
    pub trigger_event_type: Option<String>,
    pub event_ids: Vec<String>,
}

/// Response from the persistence seam after a sequence is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedSequence {
    pub id: Uuid,
    pub status: SequenceStatus,
}
