//! Transaction-related types for the banking ledger
//!
//! This module defines the immutable history record appended for every
//! completed movement, along with the movement and transfer-method tags
//! used throughout the system.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User identifier
///
/// Assigned once at registration and never reused.
pub type UserId = Uuid;

/// Account identifier
///
/// Human-readable, unique across the system (e.g. `SA-…` for savings,
/// `CC-…` for checking).
pub type AccountId = String;

/// Transaction identifier
///
/// Monotonically assigned by the ledger store; unique and never reused.
pub type TransactionId = u64;

/// Opaque session token issued at authentication
pub type SessionId = Uuid;

/// Step-up challenge token issued for transfers above the threshold
pub type ChallengeId = Uuid;

/// Movement kinds supported by the ledger
///
/// Each variant tags a balance-changing operation. The signed amount on the
/// resulting [`Transaction`] carries the direction: deposits are credits
/// (positive), withdrawals and transfers are debits (negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    ///
    /// Requires sufficient balance to succeed.
    Withdrawal,

    /// Debit the user's primary account toward an external destination
    ///
    /// The destination is an opaque label; no credit leg is applied within
    /// this ledger.
    Transfer,
}

/// Transfer method selected by the caller
///
/// Only affects the human-readable description of the recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferMethod {
    ApplePay,
    BankTransfer,
}

impl TransferMethod {
    /// Human-readable label used in transaction descriptions
    pub fn label(&self) -> &'static str {
        match self {
            TransferMethod::ApplePay => "Apple Pay",
            TransferMethod::BankTransfer => "Bank transfer",
        }
    }

    /// Parse a method tag as it appears in command scripts
    ///
    /// Accepts `apple-pay` and `bank-transfer` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "apple-pay" => Some(TransferMethod::ApplePay),
            "bank-transfer" => Some(TransferMethod::BankTransfer),
            _ => None,
        }
    }
}

/// A transfer request as submitted by a caller
///
/// Captured verbatim by the authorization gate when the amount exceeds the
/// step-up threshold, so the confirmed transfer executes exactly what was
/// originally requested regardless of later caller-side state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Amount to debit from the sender's primary account (must be positive)
    pub amount: Decimal,

    /// Opaque destination label; not a validated account
    pub destination: String,

    /// Method tag, used only for the recorded description
    pub method: TransferMethod,
}

/// Immutable history record for a completed movement
///
/// Exactly one is produced per successful deposit, withdrawal, or transfer.
/// Records are prepended to the owning user's history (newest first) and are
/// never mutated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Monotonically assigned identifier
    pub id: TransactionId,

    /// Owning user
    pub user: UserId,

    /// Date the movement completed (date granularity only)
    pub date: NaiveDate,

    /// Human-readable description (e.g. "Balance deposit")
    pub description: String,

    /// Signed amount: positive = credit, negative = debit
    ///
    /// Always equals the net balance delta applied to the account of record.
    pub amount: Decimal,

    /// Movement kind tag
    pub kind: MovementKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("apple-pay", Some(TransferMethod::ApplePay))]
    #[case("bank-transfer", Some(TransferMethod::BankTransfer))]
    #[case("APPLE-PAY", Some(TransferMethod::ApplePay))]
    #[case("wire", None)]
    #[case("", None)]
    fn test_method_parsing(#[case] input: &str, #[case] expected: Option<TransferMethod>) {
        assert_eq!(TransferMethod::parse(input), expected);
    }

    #[rstest]
    #[case(TransferMethod::ApplePay, "Apple Pay")]
    #[case(TransferMethod::BankTransfer, "Bank transfer")]
    fn test_method_labels(#[case] method: TransferMethod, #[case] expected: &str) {
        assert_eq!(method.label(), expected);
    }
}
