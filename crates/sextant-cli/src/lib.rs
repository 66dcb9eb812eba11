//! CLI logic for the Sextant diagnostics tool.
//!
//! The CLI replays a recorded sequence of XML parser error events against a
//! document and returns the diagnostics an editor would show for it.

pub mod error_adapter;
pub mod events;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use sextant::{DiagnosticPass, PassOutcome, SextantError};
use sextant_core::TextDocument;

/// Result of replaying an events file.
#[derive(Debug)]
pub struct Replay {
    /// The document the events refer to.
    pub document: TextDocument,
    /// Diagnostics and the fatal error that stopped the replay, if any.
    pub outcome: PassOutcome,
}

/// Run the Sextant CLI application
///
/// Loads the configuration, reads the document and the events file, and
/// reports every event until one aborts the parse.
///
/// # Errors
///
/// Returns `SextantError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed events files
///
/// A fatal parser error is not an error of this function; it is returned in
/// [`Replay::outcome`].
pub fn run(args: &Args) -> Result<Replay, SextantError> {
    info!(
        document_path = args.document,
        events_path = args.events;
        "Replaying error events"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(family) = args.family {
        app_config = app_config.with_family(family);
    }

    let document = TextDocument::new(fs::read_to_string(&args.document)?);
    let events = events::load_events(&args.events)?;

    let outcome = DiagnosticPass::new(app_config).run(&document, events);

    info!(
        diagnostics = outcome.diagnostics.len(),
        aborted = outcome.is_aborted();
        "Replay finished"
    );

    Ok(Replay { document, outcome })
}
