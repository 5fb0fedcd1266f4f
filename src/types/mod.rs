//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and kind tags
//! - `transaction`: History records, movement tags, and identifiers
//! - `user`: Stored users and caller-facing profiles
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountKind, SAVINGS_INTEREST_RATE};
pub use error::LedgerError;
pub use transaction::{
    AccountId, ChallengeId, MovementKind, SessionId, Transaction, TransactionId, TransferMethod,
    TransferRequest, UserId,
};
pub use user::{NewUserRequest, User, UserProfile};
