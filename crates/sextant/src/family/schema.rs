//! XML Schema validation errors.

use std::fmt;

use sextant_core::{Range, TextDocument};

use crate::{
    event::{Argument, RawLocation},
    family::{FatalErrorPolicy, RangeResolver, argument, scan::Scanner, span_range},
};

/// Schema validation error keys with a known span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaErrorCode {
    /// `cvc-complex-type.2.1`: content in an element of empty type.
    EmptyContentNotAllowed,
    /// `cvc-complex-type.2.3`: text in an element-only type.
    TextNotAllowed,
    /// `cvc-complex-type.2.4.a`: unexpected child element.
    InvalidContent,
    /// `cvc-complex-type.2.4.b`: required child element missing.
    IncompleteContent,
    /// `cvc-complex-type.2.4.c`: no declaration for a strict wildcard match.
    UndeclaredWildcardElement,
    /// `cvc-complex-type.2.4.d`: no child element expected.
    NoChildExpected,
    /// `cvc-complex-type.3.2.2`: attribute not allowed.
    AttributeNotAllowed,
    /// `cvc-complex-type.4`: required attribute missing.
    AttributeRequired,
    /// `cvc-attribute.3`: attribute value not valid for its type.
    InvalidAttributeValue,
    /// `cvc-elt.1.a`: root element not declared.
    ElementNotDeclared,
    /// `cvc-type.3.1.3`: element value not valid for its type.
    InvalidElementValue,
    /// `schema_reference.4`: schema document cannot be read.
    SchemaNotFound,
}

impl SchemaErrorCode {
    const ALL: [SchemaErrorCode; 12] = [
        SchemaErrorCode::EmptyContentNotAllowed,
        SchemaErrorCode::TextNotAllowed,
        SchemaErrorCode::InvalidContent,
        SchemaErrorCode::IncompleteContent,
        SchemaErrorCode::UndeclaredWildcardElement,
        SchemaErrorCode::NoChildExpected,
        SchemaErrorCode::AttributeNotAllowed,
        SchemaErrorCode::AttributeRequired,
        SchemaErrorCode::InvalidAttributeValue,
        SchemaErrorCode::ElementNotDeclared,
        SchemaErrorCode::InvalidElementValue,
        SchemaErrorCode::SchemaNotFound,
    ];

    /// Look up the code for a message key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == key)
    }

    /// Returns the message key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaErrorCode::EmptyContentNotAllowed => "cvc-complex-type.2.1",
            SchemaErrorCode::TextNotAllowed => "cvc-complex-type.2.3",
            SchemaErrorCode::InvalidContent => "cvc-complex-type.2.4.a",
            SchemaErrorCode::IncompleteContent => "cvc-complex-type.2.4.b",
            SchemaErrorCode::UndeclaredWildcardElement => "cvc-complex-type.2.4.c",
            SchemaErrorCode::NoChildExpected => "cvc-complex-type.2.4.d",
            SchemaErrorCode::AttributeNotAllowed => "cvc-complex-type.3.2.2",
            SchemaErrorCode::AttributeRequired => "cvc-complex-type.4",
            SchemaErrorCode::InvalidAttributeValue => "cvc-attribute.3",
            SchemaErrorCode::ElementNotDeclared => "cvc-elt.1.a",
            SchemaErrorCode::InvalidElementValue => "cvc-type.3.1.3",
            SchemaErrorCode::SchemaNotFound => "schema_reference.4",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error family for XML Schema validation errors.
///
/// Validation errors are reported once the offending start or end tag has
/// been read, so the family searches backwards from the reported offset for
/// the element or attribute named by the error arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaFamily;

impl RangeResolver for SchemaFamily {
    fn resolve(
        &self,
        location: &RawLocation,
        key: &str,
        arguments: &[Argument],
        document: &TextDocument,
    ) -> Option<Range> {
        let code = SchemaErrorCode::from_key(key)?;
        let scanner = Scanner::new(document.text());

        let span = match code {
            SchemaErrorCode::ElementNotDeclared => scanner.root_start_tag_name(),
            SchemaErrorCode::SchemaNotFound => scanner
                .root_attribute("schemaLocation")
                .or_else(|| scanner.root_attribute("noNamespaceSchemaLocation"))
                .and_then(|attribute| attribute.value),
            _ => {
                let offset = location.error_offset()?;
                match code {
                    SchemaErrorCode::AttributeNotAllowed => scanner
                        .attribute_before(offset, &argument(arguments, 1)?)
                        .map(|attribute| attribute.name),
                    SchemaErrorCode::InvalidAttributeValue => scanner
                        .attribute_before(offset, &argument(arguments, 1)?)
                        .and_then(|attribute| attribute.value),
                    SchemaErrorCode::InvalidElementValue => scanner
                        .content_before_end_tag(offset)
                        .or_else(|| scanner.end_tag_name_before(offset)),
                    _ => scanner.named_start_tag_before(offset, &argument(arguments, 0)?),
                }
            }
        }?;

        span_range(document, span)
    }
}

impl FatalErrorPolicy for SchemaFamily {}
