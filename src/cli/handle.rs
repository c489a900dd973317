//! Handle command - evaluate one webhook delivery

use crate::cli::context::CommandContext;
use automerger::error::{Error, Result};
use automerger::event::{Event, HANDLED_EVENT_TYPES};
use automerger::router::handle_event;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Options for the handle command
#[derive(Debug, Clone)]
pub struct HandleOptions {
    /// Webhook event type
    pub event_type: String,
    /// Path to the JSON payload
    pub payload_path: PathBuf,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
    /// GitHub Enterprise host
    pub host: Option<String>,
}

/// Run the handle command
pub async fn run_handle(options: HandleOptions) -> Result<()> {
    let raw = fs::read_to_string(&options.payload_path).map_err(|e| {
        Error::Payload(format!(
            "failed to read {}: {e}",
            options.payload_path.display()
        ))
    })?;
    let payload: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| Error::Payload(format!("invalid JSON: {e}")))?;

    let Some(event) = Event::from_webhook(&options.event_type, &payload)? else {
        info!(event_type = %options.event_type, "event type not handled, ignoring");
        return Ok(());
    };

    let repo = event.repo().full_name();
    let ctx = CommandContext::load(options.config_path.as_deref(), &repo, options.host)?;
    if !ctx.is_enabled() {
        info!(%repo, "auto-merge disabled for repository");
        return Ok(());
    }

    let forge = ctx.forge()?;
    handle_event(&event, forge.as_ref(), &ctx.repo_config).await
}

/// Run the events command
pub fn run_events() {
    for event_type in HANDLED_EVENT_TYPES {
        println!("{event_type}");
    }
}
