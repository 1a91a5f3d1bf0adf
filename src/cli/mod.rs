//! Command-line interface
//!
//! - `args` - argument parsing structures
//! - `aggregate` - fetch, aggregate, and emit the report

pub mod aggregate;
pub mod args;

pub use aggregate::{run_aggregate, AggregateCommand};
pub use args::Cli;
