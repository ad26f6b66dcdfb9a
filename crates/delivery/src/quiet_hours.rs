//! Quiet-hours window — the `HH:MM` do-not-disturb pair carried on a compiled
//! sequence. The execution engine enforces it at send time; this module only
//! parses and normalizes the configured strings.

use chrono::NaiveTime;

/// A validated quiet-hours window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl QuietWindow {
    /// Parse a pair of `HH:MM` strings. Returns `None` if either is malformed.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(Self {
            start: parse_hhmm(start)?,
            end: parse_hhmm(end)?,
        })
    }

    /// Whether the window crosses midnight (e.g. 20:00–08:00).
    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    pub fn start_string(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_string(&self) -> String {
        self.end.format("%H:%M").to_string()
    }

    /// Normalize operator-entered strings, degrading to the configured default
    /// window when either side fails to parse. The settings page is
    /// unconstrained, so malformed input must not block submission.
    pub fn normalize_or_default(
        start: &str,
        end: &str,
        default_start: &str,
        default_end: &str,
    ) -> (String, String) {
        match Self::parse(start, end) {
            Some(window) => (window.start_string(), window.end_string()),
            None => (default_start.to_string(), default_end.to_string()),
        }
    }
}

fn parse_hhmm(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}
