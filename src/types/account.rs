//! Account-related types for the banking ledger
//!
//! Defines the Account structure and the account kind tag. Accounts are
//! created at registration time with a zero balance and are mutated only by
//! the movement engine.

use super::transaction::{AccountId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Nominal annual interest rate attached to savings accounts (0.05)
///
/// Informational only; the ledger never applies accrual.
pub const SAVINGS_INTEREST_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Account kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Checking,
}

impl AccountKind {
    /// Lowercase label used in script commands and summary output
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Savings => "savings",
            AccountKind::Checking => "checking",
        }
    }

    /// Parse a kind label as it appears in command scripts
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "savings" => Some(AccountKind::Savings),
            "checking" => Some(AccountKind::Checking),
            _ => None,
        }
    }
}

/// A single bank account owned by exactly one user
///
/// The balance is fixed-point decimal and must never go negative; the
/// movement engine enforces this under a per-account lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique, immutable identifier
    pub id: AccountId,

    /// Owning user; ownership never changes
    pub owner: UserId,

    /// Kind tag (savings or checking)
    pub kind: AccountKind,

    /// Current balance; invariant: `balance >= 0`
    pub balance: Decimal,

    /// Optional nominal annual interest rate, informational only
    pub interest_rate: Option<Decimal>,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// Savings accounts carry the nominal interest rate; checking accounts
    /// carry none.
    pub fn new(id: AccountId, owner: UserId, kind: AccountKind) -> Self {
        Account {
            id,
            owner,
            kind,
            balance: Decimal::ZERO,
            interest_rate: match kind {
                AccountKind::Savings => Some(SAVINGS_INTEREST_RATE),
                AccountKind::Checking => None,
            },
        }
    }
}
