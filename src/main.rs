//! Banking Ledger CLI
//!
//! Command-line interface for playing banking command scripts from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- script.csv > summary.csv
//! cargo run -- --threshold 5000 script.csv > summary.csv
//! cargo run -- --confirmation-code 999999 script.csv > summary.csv
//! ```
//!
//! The program reads ledger commands from the input CSV script, plays them
//! through a `BankService`, and writes the final per-account summary to
//! stdout. Rejected rows are logged and skipped.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use rust_banking_ledger::cli;
use rust_banking_ledger::core::{StaticCodeVerifier, DEMO_CONFIRMATION_CODE, STEP_UP_THRESHOLD};
use rust_banking_ledger::io::ScriptRunner;
use rust_banking_ledger::BankService;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    // Default policy unless an override flag was given.
    let service = if args.threshold.is_some() || args.confirmation_code.is_some() {
        let threshold = args.threshold.unwrap_or(STEP_UP_THRESHOLD);
        let code = args
            .confirmation_code
            .unwrap_or_else(|| DEMO_CONFIRMATION_CODE.to_string());
        BankService::with_policy(threshold, Box::new(StaticCodeVerifier::new(code)))
    } else {
        BankService::new()
    };

    let mut runner = ScriptRunner::new(service);
    let mut output = std::io::stdout();
    if let Err(e) = runner.run(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
