//! The journey wizard compiler core: reconciles ordered steps, per-step
//! timing and message overrides, and trigger selections into one canonical
//! sequence payload for the persistence seam.

pub mod compiler;
pub mod flow;
pub mod message;
pub mod state;
pub mod store;
pub mod templates;
pub mod timing;
pub mod trigger;
pub mod validation;

pub use compiler::compile;
pub use state::WizardState;
pub use store::{InMemorySequenceStore, SequenceStore, SubmitError, WizardSession};
pub use templates::TemplateLibrary;
