//! # chapter-tally
//!
//! Pulls a student progress tree (student → chapter → attempt) from a hosted
//! realtime database or a JSON export and totals time spent per student and
//! chapter into a CSV report.
//!
//! ## Usage
//!
//! ```bash
//! chapter-tally [SOURCE] [-o report.csv] [--node StudentsProgress] [--table]
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup and fatal error reporting
//! - `cli` - Argument parsing and the aggregate command
//! - `config` - Layered configuration (defaults, files, environment, flags)
//! - `error` - Library error type
//! - `progress` - Chapter normalization, duration coercion, aggregation
//! - `report` - CSV and console table rendering
//! - `source` - HTTP, file and stdin sources for the progress tree
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod source;
