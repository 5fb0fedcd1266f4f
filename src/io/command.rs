//! CSV command format for ledger scripts
//!
//! Centralizes the script-file format concerns:
//! - CsvCommand structure for deserialization
//! - Conversion from CSV rows to ScriptCommand values
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{AccountKind, TransferMethod};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// CSV row structure for deserialization
///
/// Matches the script format with columns:
/// `op,user,password,name,email,account,amount,destination,method,code`.
/// Every column past `op` and `user` is optional because each operation
/// uses a different subset.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvCommand {
    pub op: String,
    pub user: String,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub account: Option<String>,
    pub amount: Option<String>,
    pub destination: Option<String>,
    pub method: Option<String>,
    pub code: Option<String>,
}

/// A parsed script command, ready to execute against the service
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Register {
        username: String,
        password: String,
        name: String,
        email: String,
    },
    Deposit {
        username: String,
        account: AccountKind,
        amount: Decimal,
    },
    Withdraw {
        username: String,
        account: AccountKind,
        amount: Decimal,
    },
    Transfer {
        username: String,
        amount: Decimal,
        destination: String,
        method: TransferMethod,
    },
    Confirm {
        username: String,
        code: String,
    },
    Cancel {
        username: String,
    },
}

/// Convert a CsvCommand to a ScriptCommand
///
/// Validates that the columns each operation needs are present and parse:
/// amounts must be decimals, `account` must be `savings` or `checking`,
/// `method` must be `apple-pay` or `bank-transfer`.
///
/// # Returns
///
/// * `Ok(ScriptCommand)` - successfully converted command
/// * `Err(String)` - message describing the conversion failure
pub fn convert_csv_command(row: CsvCommand) -> Result<ScriptCommand, String> {
    if row.user.trim().is_empty() {
        return Err(format!("'{}' command requires a user", row.op));
    }
    let username = row.user.trim().to_string();

    match row.op.to_lowercase().as_str() {
        "register" => Ok(ScriptCommand::Register {
            username,
            password: required(&row.op, "password", row.password)?,
            name: required(&row.op, "name", row.name)?,
            email: required(&row.op, "email", row.email)?,
        }),
        "deposit" => Ok(ScriptCommand::Deposit {
            username,
            account: parse_account(&row.op, row.account)?,
            amount: parse_amount(&row.op, row.amount)?,
        }),
        "withdraw" => Ok(ScriptCommand::Withdraw {
            username,
            account: parse_account(&row.op, row.account)?,
            amount: parse_amount(&row.op, row.amount)?,
        }),
        "transfer" => Ok(ScriptCommand::Transfer {
            username,
            amount: parse_amount(&row.op, row.amount)?,
            destination: required(&row.op, "destination", row.destination)?,
            method: parse_method(&row.op, row.method)?,
        }),
        "confirm" => Ok(ScriptCommand::Confirm {
            username,
            code: required(&row.op, "code", row.code)?,
        }),
        "cancel" => Ok(ScriptCommand::Cancel { username }),
        other => Err(format!("Invalid operation: '{}'", other)),
    }
}

fn required(op: &str, column: &str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(format!("'{}' command requires column '{}'", op, column)),
    }
}

fn parse_amount(op: &str, value: Option<String>) -> Result<Decimal, String> {
    let raw = required(op, "amount", value)?;
    Decimal::from_str(&raw).map_err(|_| format!("Invalid amount '{}' for '{}'", raw, op))
}

fn parse_account(op: &str, value: Option<String>) -> Result<AccountKind, String> {
    let raw = required(op, "account", value)?;
    AccountKind::parse(&raw).ok_or_else(|| format!("Invalid account kind '{}' for '{}'", raw, op))
}

fn parse_method(op: &str, value: Option<String>) -> Result<TransferMethod, String> {
    let raw = required(op, "method", value)?;
    TransferMethod::parse(&raw)
        .ok_or_else(|| format!("Invalid transfer method '{}' for '{}'", raw, op))
}
