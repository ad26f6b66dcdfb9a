//! Shared types, configuration, errors, and the wizard event bus for the
//! JourneyStudio customer-communication journey builder.

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use error::{JourneyError, JourneyResult};
