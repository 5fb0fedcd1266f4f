//! Error types for the banking ledger
//!
//! This module defines all errors that can occur while registering users,
//! resolving sessions, and applying money movements. Errors are designed to
//! be descriptive enough to surface verbatim to an end user where the
//! business rule demands it (e.g. insufficient funds).
//!
//! # Error Categories
//!
//! - **Registration/credential errors**: duplicate usernames, missing
//!   fields, bad credentials, invalid sessions
//! - **Movement errors**: invalid amounts, insufficient funds, lookup and
//!   ownership failures
//! - **Authorization errors**: second-factor code mismatches, missing or
//!   conflicting challenges
//!
//! All errors are local to a single request; none require system-wide
//! recovery.

use super::transaction::{AccountId, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the banking ledger
///
/// Each variant carries the context needed to diagnose the failure without
/// consulting system state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// A required registration field was empty
    ///
    /// Caller error; the registration is rejected as a whole.
    #[error("Field '{field}' is required")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// The chosen username is already taken
    #[error("User '{username}' already exists")]
    DuplicateUsername {
        /// The duplicated username
        username: String,
    },

    /// Unknown username or wrong password
    ///
    /// Deliberately does not say which, to avoid leaking which usernames
    /// exist.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The session token is unknown
    #[error("Invalid or expired session")]
    InvalidSession,

    /// Password hashing failed
    ///
    /// This is an internal error; it carries the hasher's message.
    #[error("Credential hashing failed: {message}")]
    HashingFailed {
        /// Description from the hashing backend
        message: String,
    },

    /// Non-positive movement amount
    ///
    /// Caller error; never retried.
    #[error("Invalid amount {amount}: movement amounts must be positive")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// The account balance cannot cover the requested debit
    ///
    /// Business rule violation, surfaced verbatim to the end user. The
    /// account state is unchanged.
    #[error("Insufficient funds in account {account}: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Account that was debited
        account: AccountId,
        /// Balance at the time of the check
        available: Decimal,
        /// Requested debit amount
        requested: Decimal,
    },

    /// No account has the given identifier
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The identifier that failed to resolve
        account: AccountId,
    },

    /// The account exists but belongs to a different user
    #[error("Account {account} is not owned by user {user}")]
    Forbidden {
        /// The account that was targeted
        account: AccountId,
        /// The caller that was rejected
        user: UserId,
    },

    /// No user has the given identifier
    #[error("User {user} not found")]
    UserNotFound {
        /// The identifier that failed to resolve
        user: UserId,
    },

    /// The user owns no accounts to draw a transfer from
    #[error("User {user} has no primary account")]
    NoPrimaryAccount {
        /// The transferring user
        user: UserId,
    },

    /// Balance arithmetic would overflow
    ///
    /// The movement is rejected and the account state is unchanged.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Affected account
        account: AccountId,
    },

    /// Second-factor confirmation code did not match
    ///
    /// Retryable; the captured transfer request stays pending.
    #[error("Confirmation code mismatch")]
    CodeMismatch,

    /// Confirm or cancel arrived with no challenge outstanding
    ///
    /// Also returned for a stale or foreign challenge token.
    #[error("No transfer is awaiting confirmation")]
    NoPendingChallenge,

    /// A new transfer was submitted while a challenge is still outstanding
    ///
    /// The new request is rejected; the outstanding challenge is untouched.
    #[error("A transfer is already awaiting confirmation")]
    ChallengeConflict,
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a MissingField error
    pub fn missing_field(field: &str) -> Self {
        LedgerError::MissingField {
            field: field.to_string(),
        }
    }

    /// Create a DuplicateUsername error
    pub fn duplicate_username(username: &str) -> Self {
        LedgerError::DuplicateUsername {
            username: username.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &AccountId, available: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account: account.clone(),
            available,
            requested,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &AccountId) -> Self {
        LedgerError::AccountNotFound {
            account: account.clone(),
        }
    }

    /// Create a Forbidden error
    pub fn forbidden(account: &AccountId, user: UserId) -> Self {
        LedgerError::Forbidden {
            account: account.clone(),
            user,
        }
    }

    /// Create a UserNotFound error
    pub fn user_not_found(user: UserId) -> Self {
        LedgerError::UserNotFound { user }
    }

    /// Create a NoPrimaryAccount error
    pub fn no_primary_account(user: UserId) -> Self {
        LedgerError::NoPrimaryAccount { user }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.clone(),
        }
    }

    /// Create a HashingFailed error
    pub fn hashing_failed(message: impl Into<String>) -> Self {
        LedgerError::HashingFailed {
            message: message.into(),
        }
    }
}
