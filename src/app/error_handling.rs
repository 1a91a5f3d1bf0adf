//! Error handling utilities

use crate::error::Error;
use tracing::error;

/// Report a fatal error and exit with status 1
///
/// - `verbose = 0`: the error message only
/// - `verbose >= 1`: also the full error chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);
    eprintln!("Error: {error}");

    if let Some(Error::EmptySource(_)) = error.downcast_ref::<Error>() {
        eprintln!("Check the source location and node name.");
    }

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(1)
}
