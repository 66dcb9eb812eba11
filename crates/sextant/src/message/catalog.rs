//! English message catalogs.
//!
//! Each catalog maps message keys to `MessageFormat` templates (see
//! [`format_message`]). Templates match the wording of the parsing engine's
//! message bundles so diagnostics read the same as the engine's own errors.

use indexmap::IndexMap;
use log::trace;

use crate::{
    event::Argument,
    message::{
        format::{fallback_message, format_message},
        formatter::{Locale, MessageFormatter},
    },
};

/// XML well-formedness and namespace messages.
const XML_MESSAGES: &[(&str, &str)] = &[
    (
        "AttributeNotUnique",
        "Attribute \"{1}\" was already specified for element \"{0}\".",
    ),
    (
        "AttributeNSNotUnique",
        "Attribute \"{1}\" bound to namespace \"{2}\" was already specified for element \"{0}\".",
    ),
    (
        "AttributePrefixUnbound",
        "The prefix \"{2}\" for attribute \"{1}\" associated with an element type \"{0}\" is not bound.",
    ),
    (
        "ContentIllegalInProlog",
        "Content is not allowed in prolog.",
    ),
    (
        "ContentIllegalInTrailingMisc",
        "Content is not allowed in trailing section.",
    ),
    (
        "ElementPrefixUnbound",
        "The prefix \"{1}\" for element \"{0}\" is not bound.",
    ),
    (
        "ElementUnterminated",
        "Element type \"{0}\" must be followed by either attribute specifications, \">\" or \"/>\".",
    ),
    (
        "EmptyPrefixedAttName",
        "The value of the attribute \"{0}\" is invalid. Prefixed namespace bindings may not be empty.",
    ),
    (
        "EntityNotDeclared",
        "The entity \"{0}\" was referenced, but not declared.",
    ),
    (
        "EqRequiredInAttribute",
        "Attribute name \"{1}\" associated with an element type \"{0}\" must be followed by the '' = '' character.",
    ),
    (
        "ETagRequired",
        "The element type \"{0}\" must be terminated by the matching end-tag \"</{0}>\".",
    ),
    (
        "ETagUnterminated",
        "The end-tag for element type \"{0}\" must end with a ''>'' delimiter.",
    ),
    (
        "LessthanInAttValue",
        "The value of attribute \"{1}\" associated with an element type \"{0}\" must not contain the ''<'' character.",
    ),
    (
        "MarkupEntityMismatch",
        "XML document structures must start and end within the same entity.",
    ),
    (
        "MarkupNotRecognizedInContent",
        "The content of elements must consist of well-formed character data or markup.",
    ),
    (
        "MarkupNotRecognizedInProlog",
        "The markup in the document preceding the root element must be well-formed.",
    ),
    (
        "OpenQuoteExpected",
        "Open quote is expected for attribute \"{1}\" associated with an  element type  \"{0}\".",
    ),
    (
        "PITargetRequired",
        "The processing instruction must begin with the name of the target.",
    ),
    (
        "ReservedPITarget",
        "The processing instruction target matching \"[xX][mM][lL]\" is not allowed.",
    ),
    (
        "RootElementRequired",
        "The root element is required in a well-formed document.",
    ),
    (
        "SemicolonRequiredInReference",
        "The reference to entity \"{0}\" must end with the '';'' delimiter.",
    ),
    (
        "VersionInfoRequired",
        "The version is required in the XML declaration.",
    ),
    (
        "MSG_ELEMENT_NOT_DECLARED",
        "Element type \"{0}\" must be declared.",
    ),
    (
        "MSG_ATTRIBUTE_NOT_DECLARED",
        "Attribute \"{1}\" must be declared for element type \"{0}\".",
    ),
];

/// XML Schema validation messages.
const SCHEMA_MESSAGES: &[(&str, &str)] = &[
    (
        "cvc-attribute.3",
        "cvc-attribute.3: The value ''{2}'' of attribute ''{1}'' on element ''{0}'' is not valid with respect to its type, ''{3}''.",
    ),
    (
        "cvc-complex-type.2.1",
        "cvc-complex-type.2.1: Element ''{0}'' must have no character or element information item [children], because the type''s content type is empty.",
    ),
    (
        "cvc-complex-type.2.3",
        "cvc-complex-type.2.3: Element ''{0}'' cannot have character [children], because the type''s content type is element-only.",
    ),
    (
        "cvc-complex-type.2.4.a",
        "cvc-complex-type.2.4.a: Invalid content was found starting with element ''{0}''. One of ''{1}'' is expected.",
    ),
    (
        "cvc-complex-type.2.4.b",
        "cvc-complex-type.2.4.b: The content of element ''{0}'' is not complete. One of ''{1}'' is expected.",
    ),
    (
        "cvc-complex-type.2.4.c",
        "cvc-complex-type.2.4.c: The matching wildcard is strict, but no declaration can be found for element ''{0}''.",
    ),
    (
        "cvc-complex-type.2.4.d",
        "cvc-complex-type.2.4.d: Invalid content was found starting with element ''{0}''. No child element is expected at this point.",
    ),
    (
        "cvc-complex-type.3.2.2",
        "cvc-complex-type.3.2.2: Attribute ''{1}'' is not allowed to appear in element ''{0}''.",
    ),
    (
        "cvc-complex-type.4",
        "cvc-complex-type.4: Attribute ''{1}'' must appear on element ''{0}''.",
    ),
    (
        "cvc-datatype-valid.1.2.1",
        "cvc-datatype-valid.1.2.1: ''{0}'' is not a valid value for ''{1}''.",
    ),
    (
        "cvc-elt.1.a",
        "cvc-elt.1.a: Cannot find the declaration of element ''{0}''.",
    ),
    (
        "cvc-enumeration-valid",
        "cvc-enumeration-valid: Value ''{0}'' is not facet-valid with respect to enumeration ''{1}''. It must be a value from the enumeration.",
    ),
    (
        "cvc-type.3.1.3",
        "cvc-type.3.1.3: The value ''{1}'' of element ''{0}'' is not valid.",
    ),
    (
        "schema_reference.4",
        "schema_reference.4: Failed to read schema document ''{0}'', because 1) could not find the document; 2) the document could not be read; 3) the root element of the document is not <xsd:schema>.",
    ),
];

/// `xml-model` processing instruction messages.
const XML_MODEL_MESSAGES: &[(&str, &str)] = &[
    (
        "HrefRequired",
        "The xml-model processing instruction requires an ''href'' pseudo-attribute.",
    ),
    (
        "UnsupportedSchemaType",
        "The schema ''{0}'' referenced by xml-model has the unsupported type ''{1}''.",
    ),
    (
        "SchemaNotFound",
        "The schema ''{0}'' referenced by xml-model cannot be found.",
    ),
];

/// A [`MessageFormatter`] backed by a static table of templates.
///
/// A key missing from the table formats as the key followed by
/// `?arg0&arg1&...`.
#[derive(Debug, Clone)]
pub struct CatalogFormatter {
    templates: IndexMap<&'static str, &'static str>,
}

impl CatalogFormatter {
    /// Formatter for XML well-formedness and namespace messages.
    pub fn xml() -> Self {
        Self::from_entries(XML_MESSAGES)
    }

    /// Formatter for XML Schema validation messages.
    pub fn schema() -> Self {
        Self::from_entries(SCHEMA_MESSAGES)
    }

    /// Formatter for `xml-model` processing instruction messages.
    pub fn xml_model() -> Self {
        Self::from_entries(XML_MODEL_MESSAGES)
    }

    /// Build a formatter from `(key, template)` pairs.
    pub fn from_entries(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            templates: entries.iter().copied().collect(),
        }
    }

    /// Get the template registered for `key`.
    pub fn template(&self, key: &str) -> Option<&'static str> {
        self.templates.get(key).copied()
    }

    /// Iterate over the known message keys.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.templates.keys().copied()
    }
}

impl MessageFormatter for CatalogFormatter {
    fn format(&self, locale: &Locale, key: &str, arguments: &[Argument]) -> String {
        if !locale.is_english() {
            trace!(locale = locale.as_str(), key; "No catalog for locale, using English");
        }

        match self.template(key) {
            Some(template) => format_message(template, arguments),
            None => fallback_message(key, arguments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_catalog_formats_known_key() {
        let formatter = CatalogFormatter::xml();
        let message = formatter.format(
            &Locale::default(),
            "EqRequiredInAttribute",
            &[Argument::from("root"), Argument::from("id")],
        );

        assert_eq!(
            message,
            "Attribute name \"id\" associated with an element type \"root\" must be followed by the ' = ' character."
        );
    }

    #[test]
    fn test_unknown_key_uses_key_and_arguments() {
        let formatter = CatalogFormatter::xml();
        let message = formatter.format(
            &Locale::default(),
            "NoSuchKey",
            &[Argument::from("a"), Argument::Int(1)],
        );

        assert_eq!(message, "NoSuchKey?a&1");
    }

    #[test]
    fn test_other_locale_falls_back_to_english() {
        let formatter = CatalogFormatter::xml();
        let message = formatter.format(&Locale::new("fr"), "RootElementRequired", &[]);

        assert_eq!(
            message,
            "The root element is required in a well-formed document."
        );
    }

    #[test]
    fn test_schema_catalog_quotes() {
        let formatter = CatalogFormatter::schema();
        let message = formatter.format(
            &Locale::default(),
            "cvc-complex-type.3.2.2",
            &[Argument::from("root"), Argument::from("id")],
        );

        assert_eq!(
            message,
            "cvc-complex-type.3.2.2: Attribute 'id' is not allowed to appear in element 'root'."
        );
    }

    #[test]
    fn test_catalog_keys_are_unique() {
        for entries in [XML_MESSAGES, SCHEMA_MESSAGES, XML_MODEL_MESSAGES] {
            let formatter = CatalogFormatter::from_entries(entries);
            assert_eq!(formatter.keys().count(), entries.len());
        }
    }
}
