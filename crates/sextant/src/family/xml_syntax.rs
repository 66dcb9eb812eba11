//! Well-formedness errors raised by the XML tokenizer.

use std::fmt;

use sextant_core::{Range, TextDocument};

use crate::{
    event::{Argument, RawLocation},
    family::{FatalErrorPolicy, RangeResolver, argument, scan::Scanner, span_range},
};

/// Grammar declaration keys. A broken or mismatching DTD must not stop the
/// well-formedness errors of the rest of the document from being reported.
const DTD_ERROR_KEYS: &[&str] = &[
    "MSG_ATTRIBUTE_NOT_DECLARED",
    "MSG_ATTRIBUTE_VALUE_NOT_IN_LIST",
    "MSG_CONTENT_INCOMPLETE",
    "MSG_CONTENT_INVALID",
    "MSG_ELEMENT_ALREADY_DECLARED",
    "MSG_ELEMENT_NOT_DECLARED",
    "MSG_ELEMENT_WITH_ID_REQUIRED",
    "MSG_FIXED_ATTVALUE_INVALID",
    "MSG_REQUIRED_ATTRIBUTE_NOT_SPECIFIED",
    "ElementDeclUnterminated",
    "AttNameRequiredInAttDef",
    "DTDNotFound",
];

/// Well-formedness error keys with a known span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorCode {
    /// An attribute is repeated on the same element.
    AttributeNotUnique,
    /// An attribute is repeated under the same namespace.
    AttributeNSNotUnique,
    /// An attribute uses an undeclared prefix.
    AttributePrefixUnbound,
    /// An element uses an undeclared prefix.
    ElementPrefixUnbound,
    /// A start tag is not closed by `>` or `/>`.
    ElementUnterminated,
    /// A prefixed namespace declaration has an empty value.
    EmptyPrefixedAttName,
    /// An entity is referenced but never declared.
    EntityNotDeclared,
    /// An attribute name is not followed by `=`.
    EqRequiredInAttribute,
    /// An element has no matching end tag.
    ETagRequired,
    /// An end tag is not closed by `>`.
    ETagUnterminated,
    /// An attribute value contains `<`.
    LessthanInAttValue,
    /// The document ends inside an element.
    MarkupEntityMismatch,
    /// An attribute value does not start with a quote.
    OpenQuoteExpected,
    /// An entity reference is not closed by `;`.
    SemicolonRequiredInReference,
}

impl SyntaxErrorCode {
    const ALL: [SyntaxErrorCode; 14] = [
        SyntaxErrorCode::AttributeNotUnique,
        SyntaxErrorCode::AttributeNSNotUnique,
        SyntaxErrorCode::AttributePrefixUnbound,
        SyntaxErrorCode::ElementPrefixUnbound,
        SyntaxErrorCode::ElementUnterminated,
        SyntaxErrorCode::EmptyPrefixedAttName,
        SyntaxErrorCode::EntityNotDeclared,
        SyntaxErrorCode::EqRequiredInAttribute,
        SyntaxErrorCode::ETagRequired,
        SyntaxErrorCode::ETagUnterminated,
        SyntaxErrorCode::LessthanInAttValue,
        SyntaxErrorCode::MarkupEntityMismatch,
        SyntaxErrorCode::OpenQuoteExpected,
        SyntaxErrorCode::SemicolonRequiredInReference,
    ];

    /// Look up the code for a message key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == key)
    }

    /// Returns the message key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntaxErrorCode::AttributeNotUnique => "AttributeNotUnique",
            SyntaxErrorCode::AttributeNSNotUnique => "AttributeNSNotUnique",
            SyntaxErrorCode::AttributePrefixUnbound => "AttributePrefixUnbound",
            SyntaxErrorCode::ElementPrefixUnbound => "ElementPrefixUnbound",
            SyntaxErrorCode::ElementUnterminated => "ElementUnterminated",
            SyntaxErrorCode::EmptyPrefixedAttName => "EmptyPrefixedAttName",
            SyntaxErrorCode::EntityNotDeclared => "EntityNotDeclared",
            SyntaxErrorCode::EqRequiredInAttribute => "EqRequiredInAttribute",
            SyntaxErrorCode::ETagRequired => "ETagRequired",
            SyntaxErrorCode::ETagUnterminated => "ETagUnterminated",
            SyntaxErrorCode::LessthanInAttValue => "LessthanInAttValue",
            SyntaxErrorCode::MarkupEntityMismatch => "MarkupEntityMismatch",
            SyntaxErrorCode::OpenQuoteExpected => "OpenQuoteExpected",
            SyntaxErrorCode::SemicolonRequiredInReference => "SemicolonRequiredInReference",
        }
    }
}

impl fmt::Display for SyntaxErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error family for XML well-formedness errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlSyntaxFamily;

impl RangeResolver for XmlSyntaxFamily {
    fn resolve(
        &self,
        location: &RawLocation,
        key: &str,
        arguments: &[Argument],
        document: &TextDocument,
    ) -> Option<Range> {
        let code = SyntaxErrorCode::from_key(key)?;
        let offset = location.error_offset()?;
        let scanner = Scanner::new(document.text());

        let span = match code {
            SyntaxErrorCode::AttributeNotUnique
            | SyntaxErrorCode::AttributeNSNotUnique
            | SyntaxErrorCode::AttributePrefixUnbound
            | SyntaxErrorCode::EqRequiredInAttribute
            | SyntaxErrorCode::OpenQuoteExpected => scanner
                .attribute_before(offset, &argument(arguments, 1)?)
                .map(|attribute| attribute.name),
            SyntaxErrorCode::EmptyPrefixedAttName => scanner
                .attribute_before(offset, &argument(arguments, 0)?)
                .map(|attribute| attribute.name),
            SyntaxErrorCode::LessthanInAttValue => scanner
                .attribute_before(offset, &argument(arguments, 1)?)
                .and_then(|attribute| attribute.value),
            SyntaxErrorCode::ElementPrefixUnbound | SyntaxErrorCode::ElementUnterminated => {
                scanner.named_start_tag_before(offset, &argument(arguments, 0)?)
            }
            SyntaxErrorCode::ETagRequired => {
                scanner.unclosed_start_tag_before(offset, &argument(arguments, 0)?)
            }
            SyntaxErrorCode::ETagUnterminated => scanner.end_tag_name_before(offset),
            SyntaxErrorCode::MarkupEntityMismatch => scanner.root_start_tag_name(),
            SyntaxErrorCode::EntityNotDeclared | SyntaxErrorCode::SemicolonRequiredInReference => {
                scanner.entity_reference_before(offset)
            }
        }?;

        span_range(document, span)
    }
}

impl FatalErrorPolicy for XmlSyntaxFamily {
    fn is_ignore_fatal_error(&self, key: &str) -> bool {
        key == SyntaxErrorCode::EntityNotDeclared.as_str() || DTD_ERROR_KEYS.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use sextant_core::Position;

    use super::*;

    fn resolve(text: &str, offset: i32, key: &str, arguments: &[&str]) -> Option<Range> {
        let document = TextDocument::new(text);
        let arguments: Vec<Argument> = arguments.iter().map(|a| Argument::from(*a)).collect();
        let location = RawLocation::new(offset, 1, offset);

        XmlSyntaxFamily.resolve(&location, key, &arguments, &document)
    }

    fn range(line: u32, start: u32, end: u32) -> Range {
        Range::new(Position::new(line, start), Position::new(line, end))
    }

    #[test]
    fn test_code_round_trip() {
        for code in SyntaxErrorCode::ALL {
            assert_eq!(SyntaxErrorCode::from_key(code.as_str()), Some(code));
        }
        assert_eq!(SyntaxErrorCode::from_key("cvc-elt.1.a"), None);
    }

    #[test]
    fn test_duplicate_attribute_selects_second_name() {
        // Reported right after the duplicate attribute value.
        let text = "<a id=\"1\" id=\"2\"></a>";
        let resolved = resolve(text, 17, "AttributeNotUnique", &["a", "id"]);

        assert_eq!(resolved, Some(range_of(10, 12)));
    }

    #[test]
    fn test_missing_equals_selects_attribute_name() {
        let text = "<root attr \"x\"/>";
        let resolved = resolve(text, 12, "EqRequiredInAttribute", &["root", "attr"]);

        assert_eq!(resolved, Some(range_of(6, 10)));
    }

    #[test]
    fn test_lessthan_selects_attribute_value() {
        let text = "<root attr=\"a<b\"/>";
        let resolved = resolve(text, 14, "LessthanInAttValue", &["root", "attr"]);

        assert_eq!(resolved, Some(range_of(11, 13)));
    }

    #[test]
    fn test_missing_end_tag_selects_start_tag_name() {
        let text = "<root>\n  <child>\n</root>";
        let resolved = resolve(text, 24, "ETagRequired", &["child"]);

        assert_eq!(resolved, Some(range(1, 3, 8)));
    }

    #[test]
    fn test_missing_end_tag_skips_closed_nested_namesake() {
        let text = "<a>\n<a></a>\n";
        let resolved = resolve(text, 13, "ETagRequired", &["a"]);

        assert_eq!(resolved, Some(range(0, 1, 2)));
    }

    #[test]
    fn test_unterminated_end_tag() {
        let text = "<root></root";
        let resolved = resolve(text, 13, "ETagUnterminated", &["root"]);

        assert_eq!(resolved, Some(range_of(8, 12)));
    }

    #[test]
    fn test_entity_mismatch_selects_root() {
        let text = "<?xml version=\"1.0\"?>\n<root>\n  <a>";
        let resolved = resolve(text, 36, "MarkupEntityMismatch", &[]);

        assert_eq!(resolved, Some(range(1, 1, 5)));
    }

    #[test]
    fn test_undeclared_entity_selects_reference() {
        let text = "<a>&nbsp;</a>";
        let resolved = resolve(text, 9, "EntityNotDeclared", &["nbsp"]);

        assert_eq!(resolved, Some(range_of(3, 9)));
    }

    #[test]
    fn test_unknown_key_not_resolved() {
        assert_eq!(resolve("<a/>", 2, "RootElementRequired", &[]), None);
    }

    #[test]
    fn test_missing_argument_not_resolved() {
        assert_eq!(resolve("<a b c/>", 6, "AttributeNotUnique", &["a"]), None);
    }

    #[test]
    fn test_ignored_fatal_errors() {
        assert!(XmlSyntaxFamily.is_ignore_fatal_error("EntityNotDeclared"));
        assert!(XmlSyntaxFamily.is_ignore_fatal_error("MSG_ELEMENT_NOT_DECLARED"));
        assert!(!XmlSyntaxFamily.is_ignore_fatal_error("ETagRequired"));
    }

    fn range_of(start: u32, end: u32) -> Range {
        range(0, start, end)
    }
}
