//! The error reporter: turns parser error events into diagnostics.
//!
//! An [`ErrorReporter`] is created for one parse pass. It borrows the document
//! being parsed and the caller's [`DiagnosticList`], and for every reported
//! error it:
//!
//! 1. formats the message through the [`FormatterRegistry`]
//! 2. resolves the range the error covers
//! 3. maps the parser severity onto a diagnostic severity
//! 4. records the diagnostic unless an equal one is already present
//! 5. applies the fatal-error policy
//!
//! A fatal error that must stop the parse is returned as
//! `Err(XmlParseError)`; the caller decides how to unwind.
//!
//! # Example
//!
//! ```
//! # use sextant::config::ReporterConfig;
//! # use sextant::event::{ErrorEvent, ParserSeverity, RawLocation};
//! # use sextant::family::XmlSyntaxFamily;
//! # use sextant::reporter::ErrorReporter;
//! # use sextant_core::{DiagnosticList, TextDocument};
//! let document = TextDocument::new("<root>\n  <child>\n</root>");
//! let mut diagnostics = DiagnosticList::new();
//! let mut reporter = ErrorReporter::new(
//!     &document,
//!     &mut diagnostics,
//!     XmlSyntaxFamily,
//!     ReporterConfig::default(),
//! );
//!
//! let event = ErrorEvent::new(
//!     "http://www.w3.org/TR/1998/REC-xml-19980210",
//!     "ETagRequired",
//!     ParserSeverity::FatalError,
//! )
//! .with_arguments(["child"])
//! .with_location(RawLocation::new(24, 3, 8));
//!
//! let abort = reporter.report(event).unwrap_err();
//! assert_eq!(abort.key(), "ETagRequired");
//! assert_eq!(diagnostics.len(), 1);
//! ```

use log::{debug, trace, warn};

use sextant_core::{Diagnostic, DiagnosticList, Position, Range, TextDocument};

use crate::{
    config::ReporterConfig,
    error::XmlParseError,
    event::{Argument, ErrorEvent, ParserSeverity, RawLocation, SourceException},
    family::ErrorFamily,
    message::{Domain, FormatterRegistry, fallback_message},
};

/// Converts the error reports of one parse pass into diagnostics.
pub struct ErrorReporter<'a, F> {
    document: &'a TextDocument,
    diagnostics: &'a mut DiagnosticList,
    family: F,
    formatters: FormatterRegistry,
    config: ReporterConfig,
}

impl<'a, F: ErrorFamily> ErrorReporter<'a, F> {
    /// Create a reporter writing into `diagnostics`, with the built-in
    /// message formatters.
    pub fn new(
        document: &'a TextDocument,
        diagnostics: &'a mut DiagnosticList,
        family: F,
        config: ReporterConfig,
    ) -> Self {
        Self {
            document,
            diagnostics,
            family,
            formatters: FormatterRegistry::with_defaults(),
            config,
        }
    }

    /// Replace the message formatters.
    pub fn with_formatters(mut self, formatters: FormatterRegistry) -> Self {
        self.formatters = formatters;
        self
    }

    /// Get mutable access to the message formatters, for registering
    /// additional domains.
    pub fn formatters_mut(&mut self) -> &mut FormatterRegistry {
        &mut self.formatters
    }

    /// Get the diagnostics recorded so far.
    pub fn diagnostics(&self) -> &DiagnosticList {
        self.diagnostics
    }

    /// Report a single error event.
    ///
    /// See [`ErrorReporter::report_error`].
    pub fn report(&mut self, event: ErrorEvent) -> Result<Option<String>, XmlParseError> {
        let ErrorEvent {
            domain,
            key,
            arguments,
            severity,
            location,
            exception,
        } = event;

        self.report_error(
            location.as_ref(),
            &domain,
            &key,
            &arguments,
            severity,
            exception,
        )
    }

    /// Report an error raised by the parser.
    ///
    /// Returns the formatted message if a new diagnostic was recorded, and
    /// `None` if the error was dropped because it has no resolvable range or
    /// duplicates a recorded diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`XmlParseError`] if `severity` is fatal, the configuration
    /// does not continue after fatal errors, and neither the family nor the
    /// configuration ignores fatal errors for `key`. The diagnostic is
    /// recorded before the error is returned.
    pub fn report_error(
        &mut self,
        location: Option<&RawLocation>,
        domain: &str,
        key: &str,
        arguments: &[Argument],
        severity: ParserSeverity,
        exception: Option<SourceException>,
    ) -> Result<Option<String>, XmlParseError> {
        let message = self.format_message(domain, key, arguments);

        let Some(range) = self.internal_range(location, key, arguments) else {
            debug!(domain, key; "Dropped error without a resolvable range");
            return Ok(None);
        };

        let diagnostic = Diagnostic::new(
            range,
            message.clone(),
            severity.to_diagnostic_severity(),
            self.config.source(),
            key,
        );
        let added = self.diagnostics.push_unique(diagnostic);
        if !added {
            trace!(key, range:%; "Skipped duplicate diagnostic");
        }

        if severity.is_fatal()
            && !self.config.continue_after_fatal_error()
            && !self.is_ignore_fatal_error(key)
        {
            debug!(key, range:%; "Aborting parse on fatal error");
            return Err(XmlParseError::new(
                message,
                key,
                location.copied(),
                exception,
            ));
        }

        Ok(added.then_some(message))
    }

    fn format_message(&self, domain: &str, key: &str, arguments: &[Argument]) -> String {
        match self.formatters.get(&Domain::parse(domain)) {
            Some(formatter) => formatter.format(self.config.locale(), key, arguments),
            None => {
                debug!(domain, key; "No formatter registered for domain");
                fallback_message(&format!("{domain}#{key}"), arguments)
            }
        }
    }

    fn is_ignore_fatal_error(&self, key: &str) -> bool {
        self.family.is_ignore_fatal_error(key)
            || self
                .config
                .ignored_fatal_keys()
                .iter()
                .any(|ignored| ignored == key)
    }

    /// Range of an error in document coordinates.
    fn internal_range(
        &self,
        location: Option<&RawLocation>,
        key: &str,
        arguments: &[Argument],
    ) -> Option<Range> {
        let Some(location) = location else {
            return self.position_at(0, None).map(Range::collapsed);
        };

        if let Some(range) = self
            .family
            .resolve(location, key, arguments, self.document)
        {
            return Some(range);
        }

        let offset = location.error_offset()?;
        self.position_at(offset, Some(location)).map(Range::collapsed)
    }

    /// Position of a zero-based character offset.
    ///
    /// The parser location already carries the position of its own error
    /// offset. Unless positions are validated it is used without consulting
    /// the document index.
    fn position_at(&self, offset: usize, location: Option<&RawLocation>) -> Option<Position> {
        let located = location.and_then(RawLocation::position);
        let shortcut = located.filter(|_| location.and_then(RawLocation::error_offset) == Some(offset));

        if !self.config.validate_locator_positions() {
            if let Some(position) = shortcut {
                return Some(position);
            }
        }

        match self.document.position_at(offset) {
            Ok(indexed) => {
                if let Some(position) = shortcut.filter(|position| *position != indexed) {
                    warn!(
                        offset,
                        parser:% = position,
                        document:% = indexed;
                        "Parser position disagrees with document index"
                    );
                }
                Some(indexed)
            }
            Err(err) => {
                debug!(offset, err:%; "Offset not in document, using parser position");
                located
            }
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use sextant_core::DiagnosticSeverity;

    use super::*;
    use crate::family::{FatalErrorPolicy, RangeResolver};

    struct Switch {
        ignore: bool,
    }

    impl RangeResolver for Switch {
        fn resolve(
            &self,
            _location: &RawLocation,
            _key: &str,
            _arguments: &[Argument],
            _document: &TextDocument,
        ) -> Option<Range> {
            None
        }
    }

    impl FatalErrorPolicy for Switch {
        fn is_ignore_fatal_error(&self, _key: &str) -> bool {
            self.ignore
        }
    }

    fn severity_strategy() -> impl Strategy<Value = ParserSeverity> {
        prop_oneof![
            Just(ParserSeverity::Warning),
            Just(ParserSeverity::Error),
            Just(ParserSeverity::FatalError),
        ]
    }

    fn check_severity_mapping(severity: ParserSeverity) -> Result<(), TestCaseError> {
        let document = TextDocument::new("<a/>");
        let mut diagnostics = DiagnosticList::new();
        let mut reporter = ErrorReporter::new(
            &document,
            &mut diagnostics,
            Switch { ignore: false },
            ReporterConfig::default().with_continue_after_fatal_error(true),
        );

        let result = reporter.report(
            ErrorEvent::new("xml", "E", severity).with_location(RawLocation::new(2, 1, 2)),
        );
        prop_assert!(result.is_ok());

        let expected = match severity {
            ParserSeverity::Warning => DiagnosticSeverity::Warning,
            ParserSeverity::Error | ParserSeverity::FatalError => DiagnosticSeverity::Error,
        };
        prop_assert_eq!(diagnostics.as_slice()[0].severity(), expected);
        Ok(())
    }

    fn check_dedup_idempotent(times: usize, offset: i32) -> Result<(), TestCaseError> {
        let document = TextDocument::new("<root>\n<a/>\n</root>");
        let mut diagnostics = DiagnosticList::new();
        let mut reporter = ErrorReporter::new(
            &document,
            &mut diagnostics,
            Switch { ignore: false },
            ReporterConfig::default(),
        );

        let mut added = 0;
        for _ in 0..times {
            let result = reporter.report(
                ErrorEvent::new("xml", "E", ParserSeverity::Error)
                    .with_location(RawLocation::new(offset, -1, -1)),
            );
            if matches!(result, Ok(Some(_))) {
                added += 1;
            }
        }

        prop_assert_eq!(added, 1);
        prop_assert_eq!(diagnostics.len(), 1);
        Ok(())
    }

    fn check_fallback_message_shape(
        domain: &str,
        key: &str,
        arguments: &[String],
    ) -> Result<(), TestCaseError> {
        let document = TextDocument::new("");
        let mut diagnostics = DiagnosticList::new();
        let mut reporter = ErrorReporter::new(
            &document,
            &mut diagnostics,
            Switch { ignore: false },
            ReporterConfig::default(),
        );
        let arguments: Vec<Argument> = arguments.iter().cloned().map(Argument::from).collect();

        let message = reporter
            .report_error(None, domain, key, &arguments, ParserSeverity::Warning, None)
            .ok()
            .flatten();
        prop_assert!(message.is_some());
        let message = message.unwrap_or_default();

        let prefix = format!("{domain}#{key}");
        prop_assert!(message.starts_with(&prefix));
        let suffix = &message[prefix.len()..];
        if arguments.is_empty() {
            prop_assert!(suffix.is_empty());
        } else {
            prop_assert!(suffix.starts_with('?'));
            prop_assert_eq!(suffix[1..].split('&').count(), arguments.len());
        }
        Ok(())
    }

    fn check_abort_truth_table(
        severity: ParserSeverity,
        continue_after_fatal_error: bool,
        ignore: bool,
    ) -> Result<(), TestCaseError> {
        let document = TextDocument::new("<a>");
        let mut diagnostics = DiagnosticList::new();
        let mut reporter = ErrorReporter::new(
            &document,
            &mut diagnostics,
            Switch { ignore },
            ReporterConfig::default().with_continue_after_fatal_error(continue_after_fatal_error),
        );

        let result = reporter.report(
            ErrorEvent::new("xml", "E", severity).with_location(RawLocation::new(3, 1, 3)),
        );

        let expect_abort = severity.is_fatal() && !continue_after_fatal_error && !ignore;
        prop_assert_eq!(result.is_err(), expect_abort);
        prop_assert_eq!(diagnostics.len(), 1);
        Ok(())
    }

    proptest! {
        #[test]
        fn severity_mapping_is_total(severity in severity_strategy()) {
            check_severity_mapping(severity)?;
        }

        #[test]
        fn dedup_is_idempotent(times in 1usize..6, offset in 1i32..20) {
            check_dedup_idempotent(times, offset)?;
        }

        #[test]
        fn fallback_message_shape(
            domain in "urn:[a-z]{1,8}",
            key in "[A-Za-z][A-Za-z0-9.-]{0,12}",
            arguments in prop::collection::vec("[a-z0-9 ]{0,6}", 0..4),
        ) {
            check_fallback_message_shape(&domain, &key, &arguments)?;
        }

        #[test]
        fn abort_truth_table(
            severity in severity_strategy(),
            continue_after_fatal_error in any::<bool>(),
            ignore in any::<bool>(),
        ) {
            check_abort_truth_table(severity, continue_after_fatal_error, ignore)?;
        }
    }
}
