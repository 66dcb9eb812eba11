//! Error events as reported by an XML parsing engine.
//!
//! The engine describes every problem with a message domain, a message key,
//! format arguments, a severity and a location in its own tokenizer
//! coordinates. [`ErrorEvent`] bundles these values for a single report.

use std::{error::Error, fmt};

use serde::Deserialize;

use sextant_core::{DiagnosticSeverity, Position};

/// Location of an error as tracked by the parser's tokenizer.
///
/// All values are 1-based. Values below 1 mean the parser did not know the
/// coordinate (engines report `-1` in that case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RawLocation {
    /// 1-based character offset. By convention it points one character past
    /// the error site.
    pub character_offset: i32,
    /// 1-based line number.
    pub line: i32,
    /// 1-based column number.
    pub column: i32,
}

impl RawLocation {
    /// Create a new raw location.
    pub const fn new(character_offset: i32, line: i32, column: i32) -> Self {
        Self {
            character_offset,
            line,
            column,
        }
    }

    /// Zero-based character offset of the error site (`character_offset - 1`).
    ///
    /// Returns `None` when the offset would be negative.
    pub fn error_offset(&self) -> Option<usize> {
        usize::try_from(i64::from(self.character_offset) - 1).ok()
    }

    /// Zero-based position built from the line and column.
    ///
    /// Returns `None` when either coordinate is unknown.
    pub fn position(&self) -> Option<Position> {
        let line = u32::try_from(i64::from(self.line) - 1).ok()?;
        let character = u32::try_from(i64::from(self.column) - 1).ok()?;
        Some(Position::new(line, character))
    }
}

/// Severity of an error as classified by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParserSeverity {
    /// A recoverable problem.
    Warning,
    /// A validity error; parsing continues.
    Error,
    /// A well-formedness error; parsing stops unless configured otherwise.
    FatalError,
}

impl ParserSeverity {
    /// Severity code used by the engine for warnings.
    pub const WARNING_CODE: i16 = 0;
    /// Severity code used by the engine for errors.
    pub const ERROR_CODE: i16 = 1;
    /// Severity code used by the engine for fatal errors.
    pub const FATAL_ERROR_CODE: i16 = 2;

    /// Map an engine severity code to a [`ParserSeverity`].
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            Self::WARNING_CODE => Some(Self::Warning),
            Self::ERROR_CODE => Some(Self::Error),
            Self::FATAL_ERROR_CODE => Some(Self::FatalError),
            _ => None,
        }
    }

    /// Returns `true` for [`ParserSeverity::FatalError`].
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParserSeverity::FatalError)
    }

    /// The severity shown to the user.
    ///
    /// Fatal errors display as plain errors; the distinction only matters for
    /// deciding whether parsing is aborted.
    pub fn to_diagnostic_severity(self) -> DiagnosticSeverity {
        match self {
            ParserSeverity::Warning => DiagnosticSeverity::Warning,
            ParserSeverity::Error | ParserSeverity::FatalError => DiagnosticSeverity::Error,
        }
    }
}

impl fmt::Display for ParserSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserSeverity::Warning => write!(f, "warning"),
            ParserSeverity::Error => write!(f, "error"),
            ParserSeverity::FatalError => write!(f, "fatal error"),
        }
    }
}

/// A message format argument.
///
/// The engine passes arguments as opaque values; only their text rendering
/// matters for formatting and range resolution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Argument>),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Bool(value) => write!(f, "{value}"),
            Argument::Int(value) => write!(f, "{value}"),
            Argument::Float(value) => write!(f, "{value}"),
            Argument::Str(value) => f.write_str(value),
            Argument::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Str(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Str(value)
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Int(value)
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Bool(value)
    }
}

/// The error that made the engine report an event, if any.
pub type SourceException = Box<dyn Error + Send + Sync + 'static>;

/// A single error report raised by the parsing engine.
///
/// Events are consumed by the reporter as soon as they are raised and are
/// never stored.
#[derive(Debug)]
pub struct ErrorEvent {
    pub domain: String,
    pub key: String,
    pub arguments: Vec<Argument>,
    pub severity: ParserSeverity,
    pub location: Option<RawLocation>,
    pub exception: Option<SourceException>,
}

impl ErrorEvent {
    /// Create an event without arguments, location or exception.
    ///
    /// # Example
    ///
    /// ```
    /// # use sextant::event::{ErrorEvent, ParserSeverity, RawLocation};
    /// let event = ErrorEvent::new(
    ///     "http://www.w3.org/TR/1998/REC-xml-19980210",
    ///     "ETagRequired",
    ///     ParserSeverity::FatalError,
    /// )
    /// .with_arguments(["root"])
    /// .with_location(RawLocation::new(12, 1, 12));
    /// ```
    pub fn new(domain: impl Into<String>, key: impl Into<String>, severity: ParserSeverity) -> Self {
        Self {
            domain: domain.into(),
            key: key.into(),
            arguments: Vec::new(),
            severity,
            location: None,
            exception: None,
        }
    }

    /// Set the format arguments.
    pub fn with_arguments<I, A>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Argument>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Set the parser location.
    pub fn with_location(mut self, location: RawLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach the exception that caused the event.
    pub fn with_exception(mut self, exception: impl Into<SourceException>) -> Self {
        self.exception = Some(exception.into());
        self
    }
}
