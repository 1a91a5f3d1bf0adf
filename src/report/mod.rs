//! Report serialization: CSV for files and pipes, an aligned table for people.

pub mod csv;
pub mod table;

pub use self::csv::{to_csv, write_csv};
pub use self::table::{format_hms, render_table};
