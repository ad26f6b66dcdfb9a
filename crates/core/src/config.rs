use serde::Deserialize;

use crate::types::TimingUnit;

/// Root application configuration. Loaded from environment variables with the
/// prefix `JOURNEY_STUDIO__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub suggestion: SuggestionConfig,
}

/// Defaults the compiler substitutes when wizard state leaves a field blank.
/// All default-filling happens at compile time, in one place.
#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    #[serde(default = "default_fallback_body")]
    pub fallback_body: String,
    #[serde(default = "default_wait_value")]
    pub default_wait_value: f64,
    #[serde(default = "default_wait_unit")]
    pub default_wait_unit: TimingUnit,
    #[serde(default = "default_quiet_hours_start")]
    pub quiet_hours_start: String,
    #[serde(default = "default_quiet_hours_end")]
    pub quiet_hours_end: String,
}

/// Fallback policy for the timing-suggestion advisor: on any advisor failure
/// the caller substitutes this deterministic hint instead of surfacing an
/// error.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionConfig {
    #[serde(default = "default_fallback_delay_hours")]
    pub fallback_delay_hours: f64,
    #[serde(default = "default_fallback_confidence")]
    pub fallback_confidence: f32,
}

fn default_fallback_body() -> String {
    "Thank you for your business!".to_string()
}
fn default_wait_value() -> f64 {
    0.0
}
fn default_wait_unit() -> TimingUnit {
    TimingUnit::Hours
}
fn default_quiet_hours_start() -> String {
    "20:00".to_string()
}
fn default_quiet_hours_end() -> String {
    "08:00".to_string()
}
fn default_fallback_delay_hours() -> f64 {
    24.0
}
fn default_fallback_confidence() -> f32 {
    0.5
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            fallback_body: default_fallback_body(),
            default_wait_value: default_wait_value(),
            default_wait_unit: default_wait_unit(),
            quiet_hours_start: default_quiet_hours_start(),
            quiet_hours_end: default_quiet_hours_end(),
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            fallback_delay_hours: default_fallback_delay_hours(),
            fallback_confidence: default_fallback_confidence(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("JOURNEY_STUDIO")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
