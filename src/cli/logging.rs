//! Diagnostic logging for the binary
//!
//! `-d` picks the level for f1dash; `RUST_LOG`, when set and valid, replaces
//! the computed directives entirely. Logs go to stderr so tables on stdout
//! stay pipeable.

use std::io;

use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates that log parsing chatter; held at warn whatever `-d` says.
const QUIET_CRATES: [&str; 2] = ["csv_async", "config"];

/// Level for a `-d` count, saturating at trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `EnvFilter` directives for a `-d` count.
pub fn directives(verbosity: u8) -> String {
    let quiet = QUIET_CRATES.iter().map(|c| format!(",{c}=warn")).collect::<String>();
    format!("{}{quiet}", level_for(verbosity))
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));
    // span timings only at -ddd
    let spans = if verbosity >= 3 {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(verbosity >= 2)
        .with_span_events(spans)
        .with_filter(filter);

    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        eprintln!("logging already initialised");
    }
    debug!(verbosity, "logging ready");
}
