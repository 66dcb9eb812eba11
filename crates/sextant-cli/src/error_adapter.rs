//! Adapters rendering Sextant diagnostics and errors with miette.
//!
//! The library types stay free of any rendering concern. This module bridges
//! them to [`miette`]'s graphical report handler used by the CLI:
//!
//! - [`DiagnosticAdapter`] - one recorded [`Diagnostic`] with its document
//! - [`ErrorAdapter`] - a [`SextantError`], including the fatal abort

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceSpan};

use sextant::SextantError;
use sextant_core::{Diagnostic, DiagnosticList, DiagnosticSeverity, TextDocument};

/// Adapter for a single recorded diagnostic.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Document the diagnostic range refers to
    document: &'a TextDocument,
    /// Document text for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, document: &'a TextDocument) -> Self {
        Self {
            diag,
            document,
            src: document.text(),
        }
    }

    /// Byte span of the diagnostic range in the document text.
    ///
    /// Returns `None` when the range lies outside the document, which happens
    /// when it was taken from a stale parser location.
    fn span(&self) -> Option<SourceSpan> {
        let range = self.diag.range();
        let start = self.document.offset_at(range.start).ok()?;
        let end = self.document.offset_at(range.end).ok()?.max(start);

        let start = self.document.byte_offset(start)?;
        let end = self.document.byte_offset(end)?;
        Some(SourceSpan::new(start.into(), end - start))
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("{}::{}", self.diag.source(), self.diag.code())))
    }

    fn severity(&self) -> Option<Severity> {
        Some(match self.diag.severity() {
            DiagnosticSeverity::Error => Severity::Error,
            DiagnosticSeverity::Warning => Severity::Warning,
        })
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(None, span),
        )))
    }
}

/// Adapter for [`SextantError`] values.
pub struct ErrorAdapter<'a>(pub &'a SextantError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SextantError::Io(_) => "sextant::io",
            SextantError::Fatal(_) => "sextant::fatal",
            SextantError::Config(_) => "sextant::config",
            SextantError::Events(_) => "sextant::events",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            SextantError::Fatal(err) => Some(Box::new(format!(
                "parsing stopped at `{}`; set `reporter.continue_after_fatal_error` to keep going",
                err.key()
            ))),
            _ => None,
        }
    }
}

/// A reportable item that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A recorded diagnostic with its source location.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert recorded diagnostics into reportable items, in recording order.
pub fn diagnostic_reportables<'a>(
    diagnostics: &'a DiagnosticList,
    document: &'a TextDocument,
) -> Vec<Reportable<'a>> {
    diagnostics
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, document)))
        .collect()
}

/// Convert a [`SextantError`] into a reportable item.
pub fn to_reportable(err: &SextantError) -> Reportable<'_> {
    Reportable::Error(ErrorAdapter(err))
}

#[cfg(test)]
mod tests {
    use sextant::XmlParseError;
    use sextant_core::{Position, Range};

    use super::*;

    fn diagnostic(range: Range, severity: DiagnosticSeverity) -> Diagnostic {
        Diagnostic::new(range, "something is wrong", severity, "xml", "E1")
    }

    #[test]
    fn test_diagnostic_span_uses_byte_offsets() {
        let document = TextDocument::new("<é>\n<ab>");
        let diag = diagnostic(
            Range::new(Position::new(1, 1), Position::new(1, 3)),
            DiagnosticSeverity::Error,
        );

        let adapter = DiagnosticAdapter::new(&diag, &document);
        let labels: Vec<_> = adapter.labels().expect("range is in the document").collect();

        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 6);
        assert_eq!(labels[0].len(), 2);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_diagnostic_outside_document_has_no_label() {
        let document = TextDocument::new("<a/>");
        let diag = diagnostic(
            Range::collapsed(Position::new(7, 0)),
            DiagnosticSeverity::Warning,
        );

        let adapter = DiagnosticAdapter::new(&diag, &document);

        assert!(adapter.labels().is_none());
        assert_eq!(adapter.severity(), Some(Severity::Warning));
    }

    #[test]
    fn test_diagnostic_code_and_message() {
        let document = TextDocument::new("<a/>");
        let diag = diagnostic(Range::default(), DiagnosticSeverity::Error);

        let adapter = DiagnosticAdapter::new(&diag, &document);

        assert_eq!(adapter.to_string(), "something is wrong");
        assert_eq!(adapter.code().map(|c| c.to_string()).as_deref(), Some("xml::E1"));
    }

    #[test]
    fn test_diagnostic_reportables_keep_order() {
        let document = TextDocument::new("<a/>\n<b/>");
        let mut diagnostics = DiagnosticList::new();
        diagnostics.push_unique(Diagnostic::new(
            Range::collapsed(Position::new(0, 1)),
            "first",
            DiagnosticSeverity::Error,
            "xml",
            "E1",
        ));
        diagnostics.push_unique(Diagnostic::new(
            Range::collapsed(Position::new(1, 1)),
            "second",
            DiagnosticSeverity::Warning,
            "xml",
            "E2",
        ));

        let reportables = diagnostic_reportables(&diagnostics, &document);

        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "first");
        assert_eq!(reportables[1].to_string(), "second");
    }

    #[test]
    fn test_fatal_error_reportable() {
        let err = SextantError::from(XmlParseError::new(
            "element not closed",
            "ETagRequired",
            None,
            None,
        ));

        let reportable = to_reportable(&err);

        assert_eq!(reportable.to_string(), "Fatal error: element not closed");
        assert_eq!(
            reportable.code().map(|c| c.to_string()).as_deref(),
            Some("sextant::fatal")
        );
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_config_error_reportable() {
        let err = SextantError::Config("bad".to_string());

        let reportable = to_reportable(&err);

        assert_eq!(
            reportable.code().map(|c| c.to_string()).as_deref(),
            Some("sextant::config")
        );
        assert!(reportable.help().is_none());
        assert!(reportable.labels().is_none());
    }
}
