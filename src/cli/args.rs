//! CLI argument structures

use crate::config::ConfigOverrides;
use clap::Parser;
use std::path::PathBuf;

/// Summarize time spent per student and chapter into a CSV report
#[derive(Parser, Debug)]
#[command(name = "chapter-tally")]
#[command(about = "chapter-tally - Summarize per-student, per-chapter time spent into a CSV report", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data source: database base URL, path to a JSON export, or "-" for stdin
    pub source: Option<String>,

    /// Where to write the CSV report
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Database node holding the progress tree
    #[arg(long, value_name = "NAME")]
    pub node: Option<String>,

    /// Path to configuration file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print an aligned table with HH:MM:SS totals instead of raw CSV
    #[arg(long)]
    pub table: bool,

    /// Do not write the report file
    #[arg(long)]
    pub no_write: bool,
}

impl Cli {
    /// Configuration values given on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source: self.source.clone(),
            node: self.node.clone(),
            output: self.output.clone(),
        }
    }
}
