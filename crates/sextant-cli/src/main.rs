//! Sextant CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};
use miette::{Diagnostic as _, GraphicalReportHandler, Severity};

use sextant::SextantError;
use sextant_cli::{
    Args,
    error_adapter::{Reportable, diagnostic_reportables, to_reportable},
};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Sextant");
    debug!(args:?; "Parsed arguments");

    let handler = GraphicalReportHandler::new();

    let replay = match sextant_cli::run(&args) {
        Ok(replay) => replay,
        Err(err) => {
            error!("{}", render(&handler, &to_reportable(&err)));
            process::exit(1);
        }
    };

    // Render each diagnostic independently
    for reportable in diagnostic_reportables(&replay.outcome.diagnostics, &replay.document) {
        let report = render(&handler, &reportable);
        match reportable.severity() {
            Some(Severity::Warning | Severity::Advice) => warn!("{report}"),
            _ => error!("{report}"),
        }
    }

    if let Some(abort) = replay.outcome.abort {
        let err = SextantError::from(abort);
        error!("{}", render(&handler, &to_reportable(&err)));
        process::exit(1);
    }

    info!("Completed successfully");
}

fn render(handler: &GraphicalReportHandler, reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    handler
        .render_report(&mut writer, reportable)
        .expect("Writing to String buffer is infallible");
    writer
}
