//! Error families: per-grammar range resolution and fatal-error policy.
//!
//! Different producers of parser errors know different things about their
//! errors. Well-formedness errors of the XML tokenizer and validation errors
//! of an XML Schema both name a key and a location, but the span worth
//! highlighting depends on the key. An error family bundles the two
//! capabilities the reporter delegates to:
//!
//! - [`RangeResolver`] - computes a precise range for keys with known extents
//! - [`FatalErrorPolicy`] - decides which fatal errors must not abort parsing

mod scan;
mod schema;
mod xml_syntax;

pub use schema::{SchemaErrorCode, SchemaFamily};
pub use xml_syntax::{SyntaxErrorCode, XmlSyntaxFamily};

use std::{fmt, str::FromStr};

use serde::Deserialize;

use sextant_core::{Range, TextDocument};

use crate::event::{Argument, RawLocation};

/// Computes the document range of an error with a known span.
pub trait RangeResolver {
    /// Resolve the range for the error `key` reported at `location`.
    ///
    /// Returns `None` to let the reporter fall back to a collapsed range at
    /// the reported offset.
    fn resolve(
        &self,
        location: &RawLocation,
        key: &str,
        arguments: &[Argument],
        document: &TextDocument,
    ) -> Option<Range>;
}

/// Decides whether a fatal error may be reported without aborting the parse.
pub trait FatalErrorPolicy {
    /// Returns `true` if a fatal error with `key` must not abort parsing.
    fn is_ignore_fatal_error(&self, _key: &str) -> bool {
        false
    }
}

/// A complete error family.
pub trait ErrorFamily: RangeResolver + FatalErrorPolicy {}

impl<T: RangeResolver + FatalErrorPolicy> ErrorFamily for T {}

/// Selects an error family by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKind {
    /// XML well-formedness errors.
    #[default]
    Xml,
    /// XML Schema validation errors.
    Schema,
}

impl FromStr for FamilyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(FamilyKind::Xml),
            "schema" | "xsd" => Ok(FamilyKind::Schema),
            other => Err(format!(
                "unknown error family `{other}` (expected `xml` or `schema`)"
            )),
        }
    }
}

impl fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FamilyKind::Xml => write!(f, "xml"),
            FamilyKind::Schema => write!(f, "schema"),
        }
    }
}

/// One of the built-in families, chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyFamily {
    Xml(XmlSyntaxFamily),
    Schema(SchemaFamily),
}

impl From<FamilyKind> for AnyFamily {
    fn from(kind: FamilyKind) -> Self {
        match kind {
            FamilyKind::Xml => AnyFamily::Xml(XmlSyntaxFamily),
            FamilyKind::Schema => AnyFamily::Schema(SchemaFamily),
        }
    }
}

impl RangeResolver for AnyFamily {
    fn resolve(
        &self,
        location: &RawLocation,
        key: &str,
        arguments: &[Argument],
        document: &TextDocument,
    ) -> Option<Range> {
        match self {
            AnyFamily::Xml(family) => family.resolve(location, key, arguments, document),
            AnyFamily::Schema(family) => family.resolve(location, key, arguments, document),
        }
    }
}

impl FatalErrorPolicy for AnyFamily {
    fn is_ignore_fatal_error(&self, key: &str) -> bool {
        match self {
            AnyFamily::Xml(family) => family.is_ignore_fatal_error(key),
            AnyFamily::Schema(family) => family.is_ignore_fatal_error(key),
        }
    }
}

/// Text of argument `index`, if present.
fn argument(arguments: &[Argument], index: usize) -> Option<String> {
    arguments.get(index).map(ToString::to_string)
}

/// Convert a character span into a document range.
fn span_range(document: &TextDocument, span: scan::Span) -> Option<Range> {
    let start = document.position_at(span.start).ok()?;
    let end = document.position_at(span.end).ok()?;
    Some(Range::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_kind_from_str() {
        assert_eq!("xml".parse(), Ok(FamilyKind::Xml));
        assert_eq!("Schema".parse(), Ok(FamilyKind::Schema));
        assert_eq!("xsd".parse(), Ok(FamilyKind::Schema));
        assert!("dtd".parse::<FamilyKind>().is_err());
    }

    #[test]
    fn test_any_family_dispatch() {
        let xml = AnyFamily::from(FamilyKind::Xml);
        let schema = AnyFamily::from(FamilyKind::Schema);

        assert!(xml.is_ignore_fatal_error("EntityNotDeclared"));
        assert!(!schema.is_ignore_fatal_error("EntityNotDeclared"));
    }

    #[test]
    fn test_span_range_multiline() {
        let document = TextDocument::new("<a>\n<b>");

        let range = span_range(&document, 5..6);
        assert_eq!(
            range,
            Some(Range::new(
                sextant_core::Position::new(1, 1),
                sextant_core::Position::new(1, 2)
            ))
        );
        assert_eq!(span_range(&document, 5..99), None);
    }
}
