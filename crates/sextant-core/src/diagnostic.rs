//! Range-anchored diagnostics and the per-pass diagnostic list.
//!
//! A [`Diagnostic`] is the user-facing record of one problem in a document.
//! Diagnostics are compared structurally over all of their fields, which is
//! what [`DiagnosticList`] relies on to never hold the same report twice.

use std::fmt;

use crate::position::Range;

/// The severity of a diagnostic as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// A problem that makes the document invalid.
    Error,

    /// An advisory problem.
    Warning,
}

impl DiagnosticSeverity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, DiagnosticSeverity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, DiagnosticSeverity::Warning)
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic anchored to a document range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    range: Range,
    message: String,
    severity: DiagnosticSeverity,
    source: String,
    code: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    ///
    /// # Arguments
    ///
    /// * `range` - Document range the diagnostic applies to
    /// * `message` - Human readable message
    /// * `severity` - Displayed severity
    /// * `source` - Label of the tool that produced the diagnostic (e.g. `"xml"`)
    /// * `code` - Message key of the underlying parser error
    pub fn new(
        range: Range,
        message: impl Into<String>,
        severity: DiagnosticSeverity,
        source: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            range,
            message: message.into(),
            severity,
            source: source.into(),
            code: code.into(),
        }
    }

    /// Get the document range.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Get the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the severity.
    pub fn severity(&self) -> DiagnosticSeverity {
        self.severity
    }

    /// Get the source label.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the diagnostic code.
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[ETagRequired] 0:3: message"
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.code, self.range.start, self.message
        )
    }
}

/// Insertion-ordered list of diagnostics without duplicates.
///
/// One list is owned by the caller of a validation pass and filled by a
/// single reporter during that pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticList {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `diagnostic` unless a structurally equal one is already present.
    ///
    /// Returns `true` if the diagnostic was added.
    pub fn push_unique(&mut self, diagnostic: Diagnostic) -> bool {
        if self.diagnostics.contains(&diagnostic) {
            return false;
        }
        self.diagnostics.push(diagnostic);
        true
    }

    /// Get the number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if no diagnostic was recorded.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns `true` if any recorded diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity().is_error())
    }

    /// Iterate over the diagnostics in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Get the diagnostics as a slice.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the list and return the diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<'a> IntoIterator for &'a DiagnosticList {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
