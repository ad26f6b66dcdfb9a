//! Timing Resolver — converts a declared `(value, unit)` timing into an
//! absolute delay in milliseconds, plus the per-step override map the
//! compiler consults before a step's own timing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use journey_core::types::{Step, Timing, TimingUnit};

pub const MINUTE_MS: u64 = 60_000;
pub const HOUR_MS: u64 = 3_600_000;
pub const DAY_MS: u64 = 86_400_000;

pub fn unit_ms(unit: TimingUnit) -> u64 {
    match unit {
        TimingUnit::Minutes => MINUTE_MS,
        TimingUnit::Hours => HOUR_MS,
        TimingUnit::Days => DAY_MS,
    }
}

/// Convert a timing to milliseconds. Non-finite or negative values resolve
/// to 0.
pub fn to_ms(value: f64, unit: TimingUnit) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value * unit_ms(unit) as f64).round() as u64
}

/// Parse a unit string case-insensitively. Unrecognized units default to
/// hours.
pub fn parse_unit(raw: &str) -> TimingUnit {
    match raw.trim().to_ascii_lowercase().as_str() {
        "minutes" | "minute" | "min" => TimingUnit::Minutes,
        "hours" | "hour" | "hr" => TimingUnit::Hours,
        "days" | "day" => TimingUnit::Days,
        _ => {
            warn!(unit = raw, "Unrecognized timing unit, defaulting to hours");
            TimingUnit::Hours
        }
    }
}

/// Per-step timing overrides keyed by step id. Overrides take precedence over
/// the step's own `timing` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingOverrides {
    overrides: HashMap<Uuid, Timing>,
}

impl TimingOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, step_id: Uuid, timing: Timing) {
        self.overrides.insert(step_id, timing);
    }

    pub fn clear(&mut self, step_id: &Uuid) {
        self.overrides.remove(step_id);
    }

    pub fn get(&self, step_id: &Uuid) -> Option<Timing> {
        self.overrides.get(step_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

/// Resolve a step's delay: override map first, then the step's own timing,
/// then the supplied default.
pub fn resolve_wait_ms(step: &Step, overrides: &TimingOverrides, default: Timing) -> u64 {
    let timing = overrides.get(&step.id).or(step.timing).unwrap_or(default);
    to_ms(timing.value, timing.unit)
}
