//! Send-delay suggestions — a best-effort hint for the timing page.
//!
//! Suggestions never participate in compilation: the compiled `wait_ms` comes
//! from the override map / step timing / config default chain regardless of
//! what an advisor recommends. An advisor failure degrades to a deterministic
//! fallback and is never surfaced as an error.

use serde::{Deserialize, Serialize};
use tracing::warn;

use journey_core::config::SuggestionConfig;
use journey_core::types::{MessageChannel, TimingUnit};

/// Context for a suggestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub business_id: String,
    pub channel: MessageChannel,
    pub purpose: String,
    pub customer_segment: Option<String>,
}

/// A suggested send delay with a confidence score and free-text rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSuggestion {
    pub value: f64,
    pub unit: TimingUnit,
    pub confidence: f32,
    pub rationale: String,
}

/// Trait for suggestion backends. A remote model sits behind this in
/// production; `HeuristicAdvisor` is the deterministic local implementation.
pub trait TimingAdvisor: Send + Sync {
    fn suggest(&self, request: &SuggestionRequest) -> anyhow::Result<TimingSuggestion>;
}

/// Local heuristic advisor keyed on channel and message purpose.
#[derive(Debug, Default)]
pub struct HeuristicAdvisor;

impl HeuristicAdvisor {
    pub fn new() -> Self {
        Self
    }
}

impl TimingAdvisor for HeuristicAdvisor {
    fn suggest(&self, request: &SuggestionRequest) -> anyhow::Result<TimingSuggestion> {
        let (value, unit, confidence, rationale) = match request.purpose.as_str() {
            "review_request" => (
                2.0,
                TimingUnit::Days,
                0.8,
                "Review requests convert best a couple of days after the job closes",
            ),
            "thank_you" => (
                1.0,
                TimingUnit::Hours,
                0.75,
                "Thank-you notes land best shortly after the visit",
            ),
            "appointment_reminder" => (
                1.0,
                TimingUnit::Days,
                0.85,
                "Reminders the day before reduce no-shows",
            ),
            "payment_reminder" => (
                3.0,
                TimingUnit::Days,
                0.7,
                "Give the invoice a few days before nudging",
            ),
            _ => match request.channel {
                MessageChannel::Sms => (
                    4.0,
                    TimingUnit::Hours,
                    0.6,
                    "SMS engagement peaks within the same business day",
                ),
                MessageChannel::Email => (
                    1.0,
                    TimingUnit::Days,
                    0.6,
                    "Email follow-ups perform steadily at a one-day delay",
                ),
            },
        };

        Ok(TimingSuggestion {
            value,
            unit,
            confidence,
            rationale: rationale.to_string(),
        })
    }
}

/// Ask the advisor once; on any failure substitute the configured fallback.
pub fn suggest_or_fallback(
    advisor: &dyn TimingAdvisor,
    request: &SuggestionRequest,
    config: &SuggestionConfig,
) -> TimingSuggestion {
    match advisor.suggest(request) {
        Ok(suggestion) => suggestion,
        Err(e) => {
            warn!(error = %e, purpose = %request.purpose, "Timing advisor failed, using fallback");
            TimingSuggestion {
                value: config.fallback_delay_hours,
                unit: TimingUnit::Hours,
                confidence: config.fallback_confidence,
                rationale: "Default send delay".to_string(),
            }
        }
    }
}
