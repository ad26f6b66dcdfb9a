//! JourneyStudio — customer-communication journey builder.
//!
//! Demo entry point: seeds a review-request journey, walks the wizard pages,
//! compiles it, and persists it to the in-memory store.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::{info, warn};

use journey_core::config::AppConfig;
use journey_core::types::{CrmProvider, MessageChannel, Step, Timing, TimingUnit};
use journey_delivery::suggestion::SuggestionRequest;
use journey_delivery::{suggest_or_fallback, HeuristicAdvisor};
use journey_wizard::{InMemorySequenceStore, WizardSession};

#[derive(Parser, Debug)]
#[command(name = "journey-studio")]
#[command(about = "Customer-communication journey builder")]
#[command(version)]
struct Cli {
    /// Name for the seeded demo journey
    #[arg(long, default_value = "Post-job review journey")]
    name: String,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "journey_studio=info,journey_wizard=info".into());
    if cli.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("JourneyStudio starting up");

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    let store = Arc::new(InMemorySequenceStore::new());
    let mut session =
        WizardSession::new(store.clone()).with_config(config.wizard.clone());

    // Basics: name, trigger, manual enrollment.
    let state = session.state_mut();
    state.name = cli.name;
    state.description = "Ask every customer for a review after the job closes".to_string();
    state.trigger.toggle_crm(CrmProvider::Jobber);
    state.trigger.toggle_event("job_completed");
    state.trigger.set_manual_enroll(true);

    // Flow: wait a day, email, wait three days, text.
    state.append_step(Step::wait(Timing {
        value: 1.0,
        unit: TimingUnit::Days,
    }));
    let email = Step::email("review_request");
    let email_id = email.id;
    state.append_step(email);
    state.append_step(Step::wait(Timing {
        value: 3.0,
        unit: TimingUnit::Days,
    }));
    state.append_step(Step::sms("follow_up"));

    // Settings: quiet hours and stop-on-review.
    state.quiet_hours_start = "21:00".to_string();
    state.quiet_hours_end = "07:00".to_string();
    state.stop_if_review = true;

    // Surface a send-delay hint for the email step. The hint never feeds the
    // compiled wait_ms.
    let advisor = HeuristicAdvisor::new();
    let suggestion = suggest_or_fallback(
        &advisor,
        &SuggestionRequest {
            business_id: "demo-business".to_string(),
            channel: MessageChannel::Email,
            purpose: "review_request".to_string(),
            customer_segment: None,
        },
        &config.suggestion,
    );
    info!(
        value = suggestion.value,
        unit = ?suggestion.unit,
        confidence = suggestion.confidence,
        rationale = %suggestion.rationale,
        step_id = %email_id,
        "Timing suggestion"
    );

    // Walk every page gate.
    loop {
        match session.advance() {
            Ok(page) if page == journey_wizard::validation::WizardPage::Review => break,
            Ok(page) => info!(?page, "Advanced to page"),
            Err(errors) => {
                for error in errors.iter() {
                    warn!(field = %error.field, message = %error.message, "Validation error");
                }
                return Err(anyhow!("wizard state failed validation"));
            }
        }
    }

    let payload = session.compile();
    println!("{}", serde_json::to_string_pretty(&payload)?);

    let created = session
        .submit()
        .map_err(|e| anyhow!("submission failed: {e}"))?;
    info!(sequence_id = %created.id, "Sequence persisted");
    info!(stored = store.len(), "JourneyStudio demo complete");

    Ok(())
}
