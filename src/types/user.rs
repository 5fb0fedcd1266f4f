//! User-related types for the banking ledger
//!
//! The stored [`User`] record carries the credential hash and is never handed
//! to callers directly; the password-free [`UserProfile`] view is what the
//! external interface returns.

use super::account::Account;
use super::transaction::{AccountId, Transaction, UserId};
use serde::{Deserialize, Serialize};

/// Durable user record held by the ledger store
///
/// Created at registration and never deleted. `account_ids` preserves
/// registration order; the first entry is the primary account used as the
/// implicit source for transfers. `transactions` is kept newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique, immutable identifier
    pub id: UserId,

    /// Unique login name
    pub username: String,

    /// Display name
    pub name: String,

    /// Contact info
    pub email: String,

    /// Argon2id credential hash; never serialized out of the store
    pub password_hash: String,

    /// Owned accounts in registration order; first entry is the primary
    pub account_ids: Vec<AccountId>,

    /// Reverse-chronological transaction history (newest first)
    pub transactions: Vec<Transaction>,
}

/// Password-free user view returned to callers
///
/// Assembled by the service layer from the stored user plus its account
/// states, mirroring the store's registration order and history ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub email: String,

    /// Accounts in registration order; first entry is the primary
    pub accounts: Vec<Account>,

    /// Transaction history, newest first
    pub transactions: Vec<Transaction>,
}

/// Registration request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}
