//! Account resolution and ownership validation
//!
//! Given a user and an account identifier, the resolver locates the account
//! and validates ownership. A user may only deposit into or withdraw from
//! their own accounts; the check is mandatory for every movement, not an
//! optional courtesy of the caller.

use crate::core::store::LedgerStore;
use crate::types::{Account, AccountId, LedgerError, UserId};
use std::sync::Arc;

/// Locates accounts and enforces the ownership rule
///
/// Fails with `AccountNotFound` when no account has the given identifier and
/// with `Forbidden` when the account exists but belongs to someone else.
pub struct AccountResolver {
    store: Arc<LedgerStore>,
}

impl AccountResolver {
    /// Create a resolver over the given store
    pub fn new(store: Arc<LedgerStore>) -> Self {
        AccountResolver { store }
    }

    /// Resolve an account snapshot, validating ownership
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - no account has this identifier
    /// * `Forbidden` - the account is not owned by `user`
    pub fn resolve_owned(&self, user: UserId, account_id: &AccountId) -> Result<Account, LedgerError> {
        let account = self
            .store
            .get_account(account_id)
            .ok_or_else(|| LedgerError::account_not_found(account_id))?;
        Self::ensure_owned(user, &account)?;
        Ok(account)
    }

    /// Pure ownership check, usable inside an account entry guard
    ///
    /// The movement engine calls this from within `with_account_mut` so the
    /// ownership check and the balance mutation sit under the same lock.
    pub fn ensure_owned(user: UserId, account: &Account) -> Result<(), LedgerError> {
        if account.owner != user {
            return Err(LedgerError::forbidden(&account.id, user));
        }
        Ok(())
    }
}
