//! Logging configuration and initialization
//!
//! Log lines go to stderr; stdout carries the report.

use tracing::{debug, trace};

/// Filter directive for a verbosity count
///
/// Without `-v` the configured base level applies.
pub fn log_filter(verbose: u8, base_level: &str) -> String {
    match verbose {
        0 => base_level.to_string(),
        1 => "debug".to_string(),
        2 => "trace".to_string(),
        _ => "trace,hyper=debug,reqwest=debug".to_string(), // -vvv shows everything including dependencies
    }
}

/// Initialize tracing/logging for the application
pub fn init_logging(verbose: u8, base_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, base_level))
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("chapter-tally started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
