//! Ledger store: the single owner of mutable ledger state
//!
//! This module provides the `LedgerStore`, which maps user ids to user
//! records (including their transaction histories) and account ids to
//! account states. Every other component operates through the store rather
//! than caching copies.
//!
//! # Concurrency
//!
//! State lives in `DashMap`s, whose per-entry guards provide the per-account
//! mutual exclusion required for balance checks: any read-modify-write
//! against an account's balance runs inside [`LedgerStore::with_account_mut`]
//! so that two concurrent debits can never both pass a sufficient-funds
//! check against a stale balance. Reads return snapshot clones; concurrent
//! mutations after the snapshot are not reflected.
//!
//! # Lifecycle
//!
//! A store is constructed at startup and shared by reference (`Arc`) with
//! all components. It is deliberately not a module-level global, so tests
//! can instantiate isolated stores.

use crate::types::{Account, AccountId, LedgerError, Transaction, TransactionId, User, UserId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Owns the mapping from account id to balance and from user id to history
///
/// Keyed lookups with unique-key map semantics; the only ordering guarantee
/// is the insertion (newest-first) order of each user's transaction
/// sequence.
#[derive(Debug, Default)]
pub struct LedgerStore {
    /// User records, including per-user transaction histories
    users: DashMap<UserId, User>,

    /// Account states, keyed by their system-wide unique id
    accounts: DashMap<AccountId, Account>,

    /// Username uniqueness index for registration and login
    usernames: DashMap<String, UserId>,

    /// Next transaction identifier; monotone, never reused
    next_tx_id: AtomicU64,
}

impl LedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        LedgerStore {
            users: DashMap::new(),
            accounts: DashMap::new(),
            usernames: DashMap::new(),
            next_tx_id: AtomicU64::new(1),
        }
    }

    /// Insert a newly registered user
    ///
    /// Enforces username uniqueness atomically via the index entry.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` if the username is already taken; the
    /// store is unchanged in that case.
    pub fn insert_user(&self, user: User) -> Result<(), LedgerError> {
        let claimed = *self.usernames.entry(user.username.clone()).or_insert(user.id);
        if claimed != user.id {
            return Err(LedgerError::duplicate_username(&user.username));
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    /// Get a snapshot of a user record
    pub fn get_user(&self, id: UserId) -> Option<User> {
        self.users.get(&id).map(|entry| entry.value().clone())
    }

    /// Look up a user by login name
    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        let id = *self.usernames.get(username)?;
        self.get_user(id)
    }

    /// Insert a newly created account
    pub fn insert_account(&self, account: Account) {
        self.accounts.insert(account.id.clone(), account);
    }

    /// Get a snapshot of an account state
    pub fn get_account(&self, id: &AccountId) -> Option<Account> {
        self.accounts.get(id).map(|entry| entry.value().clone())
    }

    /// Run a closure against an account under its entry guard
    ///
    /// The guard excludes concurrent mutation of the same account for the
    /// duration of the closure, making check-then-apply balance sequences
    /// safe. The closure must not touch other accounts.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has the given id; otherwise
    /// propagates the closure's result.
    pub fn with_account_mut<T, F>(&self, id: &AccountId, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<T, LedgerError>,
    {
        let mut entry = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        f(entry.value_mut())
    }

    /// Allocate the next transaction identifier
    ///
    /// Identifiers are monotone and never reused, even across failed
    /// movements.
    pub fn next_transaction_id(&self) -> TransactionId {
        self.next_tx_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Prepend a transaction to a user's history
    ///
    /// The history is kept newest-first; records are never mutated or
    /// removed afterwards.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not exist.
    pub fn append_transaction(&self, user: UserId, tx: Transaction) -> Result<(), LedgerError> {
        let mut entry = self
            .users
            .get_mut(&user)
            .ok_or_else(|| LedgerError::user_not_found(user))?;
        entry.transactions.insert(0, tx);
        Ok(())
    }

    /// Snapshot all users, sorted by username
    ///
    /// Sorting gives deterministic output for summary generation.
    pub fn get_all_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }
}
