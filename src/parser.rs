//! Events arrive one JSON object per line. Unknown event types and log levels
//! decode into their `Unrecognized` variants rather than failing.

use anyhow::{Context, Result};
use tracing::{event, instrument, Level};

use crate::events::Event;

/// Parses a single line into an event. Blank lines yield `None`.
#[instrument]
pub fn parse_event(input: &str) -> Result<Option<Event>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    event!(Level::DEBUG, "Parsing event: '{}'", input);
    let parsed = serde_json::from_str::<Event>(input)
        .with_context(|| format!("Failed to parse event: {}", input))?;
    event!(Level::DEBUG, "Parsed event: {:?}", parsed);

    Ok(Some(parsed))
}
