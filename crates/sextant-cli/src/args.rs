//! Command-line argument definitions for the Sextant CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the document, the recorded error events,
//! the configuration file, the error family and the logging verbosity.

use clap::Parser;

use sextant::family::FamilyKind;

/// Command-line arguments for the Sextant diagnostics tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the XML document the events refer to
    #[arg(help = "Path to the XML document")]
    pub document: String,

    /// Path to the recorded error events (TOML)
    #[arg(help = "Path to the error events file")]
    pub events: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Error family (xml, schema); overrides the configuration
    #[arg(short, long)]
    pub family: Option<FamilyKind>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
