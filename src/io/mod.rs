//! Script input and summary output
//!
//! - `command`: CSV script format and conversion to commands
//! - `report`: summary CSV output
//! - `script`: streaming script reader and runner

pub mod command;
pub mod report;
pub mod script;

pub use command::{convert_csv_command, CsvCommand, ScriptCommand};
pub use report::write_summary_csv;
pub use script::{ScriptReader, ScriptRunner};
