//! Core types for Sextant.
//!
//! Document coordinates ([`Position`], [`Range`]), the offset index over a
//! document ([`TextDocument`]) and the diagnostics produced for it
//! ([`Diagnostic`], [`DiagnosticList`]).

pub mod diagnostic;
pub mod document;
pub mod position;

pub use diagnostic::{Diagnostic, DiagnosticList, DiagnosticSeverity};
pub use document::{BadLocation, TextDocument};
pub use position::{Position, Range};
