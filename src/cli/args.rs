use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

/// Play a banking command script and print the ledger summary
#[derive(Parser, Debug)]
#[command(name = "banking-ledger")]
#[command(about = "Play a banking command script and print the ledger summary", long_about = None)]
pub struct CliArgs {
    /// Input CSV script with ledger commands
    #[arg(value_name = "INPUT", help = "Path to the input script CSV file")]
    pub input_file: PathBuf,

    /// Step-up confirmation threshold override
    #[arg(
        long = "threshold",
        value_name = "AMOUNT",
        value_parser = parse_decimal,
        help = "Transfers above this amount require confirmation (default: 1000)"
    )]
    pub threshold: Option<Decimal>,

    /// Confirmation code override
    #[arg(
        long = "confirmation-code",
        value_name = "CODE",
        help = "Code that confirms step-up transfers (default: the demo code)"
    )]
    pub confirmation_code: Option<String>,
}

fn parse_decimal(value: &str) -> Result<Decimal, String> {
    Decimal::from_str(value).map_err(|e| format!("Invalid decimal '{}': {}", value, e))
}
