//! Formatter for XML Schema validation messages.
//!
//! The engine passes the set of expected elements for content-model errors
//! as a single argument such as `{"http://example.com/ns":title, "http://example.com/ns":body}`.
//! [`SchemaFormatter`] rewrites those lists into one local name per line so
//! the message stays readable in an editor hover.

use crate::{
    event::Argument,
    message::{
        catalog::CatalogFormatter,
        format::format_message,
        formatter::{Locale, MessageFormatter},
    },
};

/// Keys whose second argument lists the expected elements, with the template
/// used once the list is rewritten.
const EXPECTED_ELEMENT_TEMPLATES: &[(&str, &str)] = &[
    (
        "cvc-complex-type.2.4.a",
        "cvc-complex-type.2.4.a: Invalid content was found starting with element ''{0}''. One of the following is expected:{1}",
    ),
    (
        "cvc-complex-type.2.4.b",
        "cvc-complex-type.2.4.b: The content of element ''{0}'' is not complete. One of the following is expected:{1}",
    ),
];

/// Schema message formatter.
#[derive(Debug, Clone)]
pub struct SchemaFormatter {
    catalog: CatalogFormatter,
}

impl SchemaFormatter {
    /// Create a formatter over the English schema catalog.
    pub fn new() -> Self {
        Self {
            catalog: CatalogFormatter::schema(),
        }
    }
}

impl Default for SchemaFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageFormatter for SchemaFormatter {
    fn format(&self, locale: &Locale, key: &str, arguments: &[Argument]) -> String {
        let template = EXPECTED_ELEMENT_TEMPLATES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, template)| *template);

        match (template, arguments) {
            (Some(template), [element, expected, rest @ ..]) => {
                let mut rewritten = vec![element.clone(), expected_element_list(expected)];
                rewritten.extend_from_slice(rest);
                format_message(template, &rewritten)
            }
            _ => self.catalog.format(locale, key, arguments),
        }
    }
}

/// Rewrite `{"ns":a, "ns":b}` into `"\n - a\n - b"`.
fn expected_element_list(argument: &Argument) -> Argument {
    let text = argument.to_string();
    let inner = text.trim().trim_start_matches('{').trim_end_matches('}');

    let mut list = String::new();
    for item in inner.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        list.push_str("\n - ");
        list.push_str(local_name(item));
    }
    Argument::Str(list)
}

/// Strip a leading `"namespace":` qualifier from an element name.
fn local_name(item: &str) -> &str {
    match item.strip_prefix('"').and_then(|rest| rest.split_once("\":")) {
        Some((_, name)) => name,
        None => item,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_expected_elements() {
        let formatter = SchemaFormatter::new();
        let message = formatter.format(
            &Locale::default(),
            "cvc-complex-type.2.4.a",
            &[
                Argument::from("note"),
                Argument::from("{\"http://example.com\":title, \"http://example.com\":body}"),
            ],
        );

        assert_eq!(
            message,
            "cvc-complex-type.2.4.a: Invalid content was found starting with element 'note'. One of the following is expected:\n - title\n - body"
        );
    }

    #[test]
    fn test_unqualified_expected_elements() {
        let formatter = SchemaFormatter::new();
        let message = formatter.format(
            &Locale::default(),
            "cvc-complex-type.2.4.b",
            &[Argument::from("note"), Argument::from("{to}")],
        );

        assert_eq!(
            message,
            "cvc-complex-type.2.4.b: The content of element 'note' is not complete. One of the following is expected:\n - to"
        );
    }

    #[test]
    fn test_other_keys_use_catalog() {
        let formatter = SchemaFormatter::new();
        let message = formatter.format(
            &Locale::default(),
            "cvc-elt.1.a",
            &[Argument::from("note")],
        );

        assert_eq!(
            message,
            "cvc-elt.1.a: Cannot find the declaration of element 'note'."
        );
    }

    #[test]
    fn test_missing_list_argument_uses_catalog() {
        let formatter = SchemaFormatter::new();
        let message = formatter.format(
            &Locale::default(),
            "cvc-complex-type.2.4.a",
            &[Argument::from("note")],
        );

        assert_eq!(
            message,
            "cvc-complex-type.2.4.a: Invalid content was found starting with element 'note'. One of '{1}' is expected."
        );
    }
}
