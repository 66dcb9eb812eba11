//! Message template expansion.
//!
//! Templates follow the `MessageFormat` conventions of the engine's message
//! bundles: `{n}` is replaced by argument `n`, text between single quotes is
//! copied literally and `''` produces one single quote.

use std::fmt::Write as _;

use crate::event::Argument;

/// Expand a message template with the given arguments.
///
/// A placeholder without a matching argument is kept verbatim.
///
/// # Example
///
/// ```
/// # use sextant::{event::Argument, message::format_message};
/// let message = format_message("Attribute ''{1}'' is not allowed on ''{0}''.", &[
///     Argument::from("root"),
///     Argument::from("id"),
/// ]);
/// assert_eq!(message, "Attribute 'id' is not allowed on 'root'.");
/// ```
pub fn format_message(template: &str, arguments: &[Argument]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut quoted = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\'' if chars.next_if_eq(&'\'').is_some() => out.push('\''),
            '\'' => quoted = !quoted,
            '{' if !quoted => {
                let mut placeholder = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    placeholder.push(inner);
                }

                let argument = placeholder
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| arguments.get(index));
                match argument {
                    Some(argument) if closed => {
                        let _ = write!(out, "{argument}");
                    }
                    _ => {
                        out.push('{');
                        out.push_str(&placeholder);
                        if closed {
                            out.push('}');
                        }
                    }
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Build the deterministic text used when no template exists.
///
/// The shape is `prefix`, followed by `?arg0&arg1&...` when there are
/// arguments.
///
/// # Example
///
/// ```
/// # use sextant::{event::Argument, message::fallback_message};
/// assert_eq!(fallback_message("urn:custom#E1", &[]), "urn:custom#E1");
/// assert_eq!(
///     fallback_message("urn:custom#E1", &[Argument::from("a"), Argument::Int(2)]),
///     "urn:custom#E1?a&2"
/// );
/// ```
pub fn fallback_message(prefix: &str, arguments: &[Argument]) -> String {
    let mut out = String::from(prefix);
    for (i, argument) in arguments.iter().enumerate() {
        out.push(if i == 0 { '?' } else { '&' });
        let _ = write!(out, "{argument}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<Argument> {
        values.iter().map(|v| Argument::from(*v)).collect()
    }

    #[test]
    fn test_substitutes_placeholders() {
        let message = format_message(
            "The element type \"{0}\" must be terminated by \"</{0}>\".",
            &args(&["root"]),
        );

        assert_eq!(
            message,
            "The element type \"root\" must be terminated by \"</root>\"."
        );
    }

    #[test]
    fn test_missing_argument_kept_verbatim() {
        assert_eq!(format_message("{0} and {1}", &args(&["a"])), "a and {1}");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(format_message("''{0}''", &args(&["x"])), "'x'");
        assert_eq!(format_message("'{0}' is {0}", &args(&["x"])), "{0} is x");
        assert_eq!(
            format_message("the '' = '' character", &[]),
            "the ' = ' character"
        );
    }

    #[test]
    fn test_unterminated_placeholder() {
        assert_eq!(format_message("broken {0", &args(&["x"])), "broken {0");
    }

    #[test]
    fn test_non_numeric_placeholder() {
        assert_eq!(format_message("{name}", &args(&["x"])), "{name}");
    }

    #[test]
    fn test_fallback_message() {
        assert_eq!(fallback_message("d#k", &[]), "d#k");
        assert_eq!(fallback_message("d#k", &args(&["a", "b", "c"])), "d#k?a&b&c");
    }
}
