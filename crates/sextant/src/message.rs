//! Message formatting for parser error reports.
//!
//! Every error report names a message *domain* and a *key*. The
//! [`FormatterRegistry`] maps each known [`Domain`] to a [`MessageFormatter`]
//! that turns the key and its arguments into readable text:
//!
//! - XML well-formedness and XML namespaces share the XML catalog
//! - XML Schema validation uses [`SchemaFormatter`]
//! - `xml-model` processing instructions use their own catalog
//!
//! # Example
//!
//! ```
//! # use sextant::event::Argument;
//! # use sextant::message::{Domain, FormatterRegistry, Locale};
//! let registry = FormatterRegistry::with_defaults();
//! let formatter = registry.get(&Domain::Xml).unwrap();
//!
//! let message = formatter.format(&Locale::default(), "ETagRequired", &[Argument::from("root")]);
//! assert_eq!(
//!     message,
//!     "The element type \"root\" must be terminated by the matching end-tag \"</root>\"."
//! );
//! ```

mod catalog;
mod domain;
mod format;
mod formatter;
mod registry;
mod schema;

pub use catalog::CatalogFormatter;
pub use domain::Domain;
pub use format::{fallback_message, format_message};
pub use formatter::{Locale, MessageFormatter};
pub use registry::FormatterRegistry;
pub use schema::SchemaFormatter;
