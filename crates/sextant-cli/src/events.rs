//! Recorded error events.
//!
//! The CLI replays error events stored as TOML, one `[[event]]` table per
//! report:
//!
//! ```toml
//! [[event]]
//! domain = "http://www.w3.org/TR/1998/REC-xml-19980210"
//! key = "ETagRequired"
//! arguments = ["child"]
//! severity = "fatal-error"
//! location = { character_offset = 24, line = 3, column = 8 }
//! exception = "XML document structures must start and end within the same entity."
//! ```

use std::{fs, path::Path};

use log::debug;
use serde::Deserialize;

use sextant::{
    SextantError,
    event::{Argument, ErrorEvent, ParserSeverity, RawLocation},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventFile {
    #[serde(default, rename = "event")]
    events: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventRecord {
    domain: String,
    key: String,
    #[serde(default)]
    arguments: Vec<Argument>,
    severity: ParserSeverity,
    location: Option<RawLocation>,
    /// Message of the engine exception behind the report.
    exception: Option<String>,
}

impl From<EventRecord> for ErrorEvent {
    fn from(record: EventRecord) -> Self {
        let mut event = ErrorEvent::new(record.domain, record.key, record.severity)
            .with_arguments(record.arguments);
        if let Some(location) = record.location {
            event = event.with_location(location);
        }
        if let Some(exception) = record.exception {
            event = event.with_exception(exception);
        }
        event
    }
}

/// Parse recorded error events.
///
/// # Errors
///
/// Returns [`SextantError::Events`] if `content` is not a valid events file.
pub fn parse_events(content: &str) -> Result<Vec<ErrorEvent>, SextantError> {
    let file: EventFile =
        toml::from_str(content).map_err(|err| SextantError::Events(err.to_string()))?;
    debug!(count = file.events.len(); "Parsed error events");

    Ok(file.events.into_iter().map(ErrorEvent::from).collect())
}

/// Read and parse an events file.
///
/// # Errors
///
/// Returns [`SextantError::Io`] if the file cannot be read and
/// [`SextantError::Events`] if it cannot be parsed.
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<ErrorEvent>, SextantError> {
    let content = fs::read_to_string(path)?;
    parse_events(&content)
}
