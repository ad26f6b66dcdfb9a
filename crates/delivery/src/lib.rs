//! Delivery-side helpers consumed by the journey wizard: best-effort timing
//! suggestions with a deterministic fallback, and the quiet-hours window
//! format. Runtime enforcement of either belongs to the execution engine.

pub mod quiet_hours;
pub mod suggestion;

pub use quiet_hours::QuietWindow;
pub use suggestion::{suggest_or_fallback, HeuristicAdvisor, TimingAdvisor, TimingSuggestion};
