//! Sextant - turns XML parser error reports into editor diagnostics.
//!
//! An XML parsing engine reports every problem as a message domain, a key,
//! format arguments, a severity and a location in its own tokenizer
//! coordinates. Sextant formats those reports, anchors them to a range in the
//! document, removes duplicates and decides when a fatal error has to stop
//! the parse.
//!
//! The [`reporter::ErrorReporter`] handles one report at a time and is meant to
//! be driven by the engine. [`DiagnosticPass`] replays a complete sequence of
//! error events against a document.

pub mod config;
pub mod error;
pub mod event;
pub mod family;
pub mod message;
pub mod reporter;

pub use error::{SextantError, XmlParseError};

use log::{debug, info};

use sextant_core::{DiagnosticList, TextDocument};

use config::AppConfig;
use event::ErrorEvent;
use family::AnyFamily;
use reporter::ErrorReporter;

/// Result of a [`DiagnosticPass`].
#[derive(Debug)]
pub struct PassOutcome {
    /// Diagnostics recorded during the pass, including the one for the error
    /// that aborted it.
    pub diagnostics: DiagnosticList,
    /// The fatal error that stopped the pass, if any.
    pub abort: Option<XmlParseError>,
}

impl PassOutcome {
    /// Returns `true` if a fatal error stopped the pass.
    pub fn is_aborted(&self) -> bool {
        self.abort.is_some()
    }
}

/// Replays the error events of one parse against a document.
///
/// # Examples
///
/// ```
/// use sextant::{DiagnosticPass, config::AppConfig};
/// use sextant::event::{ErrorEvent, ParserSeverity, RawLocation};
/// use sextant_core::TextDocument;
///
/// let document = TextDocument::new("<root>\n  <child>\n</root>");
/// let events = [ErrorEvent::new(
///     "http://www.w3.org/TR/1998/REC-xml-19980210",
///     "ETagRequired",
///     ParserSeverity::FatalError,
/// )
/// .with_arguments(["child"])
/// .with_location(RawLocation::new(24, 3, 8))];
///
/// let outcome = DiagnosticPass::new(AppConfig::default()).run(&document, events);
/// assert!(outcome.is_aborted());
/// assert_eq!(outcome.diagnostics.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticPass {
    config: AppConfig,
}

impl DiagnosticPass {
    /// Create a pass with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Report `events` in order until they are exhausted or one aborts the
    /// parse.
    pub fn run<I>(&self, document: &TextDocument, events: I) -> PassOutcome
    where
        I: IntoIterator<Item = ErrorEvent>,
    {
        let family = self.config.family();
        info!(family:%; "Reporting parser errors");

        let mut diagnostics = DiagnosticList::new();
        let mut reporter = ErrorReporter::new(
            document,
            &mut diagnostics,
            AnyFamily::from(family),
            self.config.reporter().clone(),
        );

        let mut reported = 0usize;
        let mut abort = None;
        for event in events {
            reported += 1;
            if let Err(err) = reporter.report(event) {
                abort = Some(err);
                break;
            }
        }

        debug!(reported; "Replayed error events");
        info!(
            diagnostics = diagnostics.len(),
            aborted = abort.is_some();
            "Reporting finished"
        );

        PassOutcome { diagnostics, abort }
    }
}
