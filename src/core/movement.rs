//! Movement engine: deposit, withdrawal, and transfer
//!
//! This module implements the three money movements as atomic operations.
//! Each movement validates first, applies its balance change under the
//! account's entry guard, and then records exactly one history entry whose
//! signed amount equals the applied delta.
//!
//! # Atomicity
//!
//! All fallible work (amount validation, ownership check, sufficient-funds
//! check, checked arithmetic) happens before or inside the account lock.
//! The history append that follows is infallible for an existing user, so a
//! balance can never be mutated without its paired record, and a rejected
//! movement leaves the balance untouched.

use crate::core::recorder::TransactionRecorder;
use crate::core::resolver::AccountResolver;
use crate::core::store::LedgerStore;
use crate::types::{
    AccountId, LedgerError, MovementKind, Transaction, TransferRequest, UserId,
};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Description recorded for deposits
const DEPOSIT_DESCRIPTION: &str = "Balance deposit";

/// Description recorded for withdrawals
const WITHDRAWAL_DESCRIPTION: &str = "Cash withdrawal";

/// Applies balance changes and records history entries
///
/// Orchestrates the resolver (ownership), the store (balance mutation under
/// per-account locks), and the recorder (history append).
pub struct MovementEngine {
    store: Arc<LedgerStore>,
    resolver: AccountResolver,
    recorder: TransactionRecorder,
}

impl MovementEngine {
    /// Create a movement engine over the given store
    pub fn new(store: Arc<LedgerStore>) -> Self {
        let resolver = AccountResolver::new(Arc::clone(&store));
        let recorder = TransactionRecorder::new(Arc::clone(&store));
        MovementEngine {
            store,
            resolver,
            recorder,
        }
    }

    /// Deposit funds into one of the user's own accounts
    ///
    /// Increases the balance by `amount` and records a Deposit entry with a
    /// positive signed amount.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - `amount <= 0`
    /// * `AccountNotFound` / `Forbidden` - per the account resolver
    pub fn deposit(
        &self,
        user: UserId,
        account_id: &AccountId,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        validate_amount(amount)?;
        self.resolver.resolve_owned(user, account_id)?;

        self.store.with_account_mut(account_id, |account| {
            // Re-checked under the entry guard; the snapshot above may be stale.
            AccountResolver::ensure_owned(user, account)?;
            account.balance = account
                .balance
                .checked_add(amount)
                .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", &account.id))?;
            Ok(())
        })?;

        self.recorder.record(
            user,
            MovementKind::Deposit,
            amount,
            DEPOSIT_DESCRIPTION.to_string(),
        )
    }

    /// Withdraw funds from one of the user's own accounts
    ///
    /// Decreases the balance by `amount` and records a Withdrawal entry with
    /// a negative signed amount. The sufficient-funds check and the debit
    /// run under the same account lock, so two concurrent withdrawals can
    /// never both pass against a stale balance.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - `amount <= 0`
    /// * `InsufficientFunds` - `balance < amount`; state unchanged
    /// * `AccountNotFound` / `Forbidden` - per the account resolver
    pub fn withdraw(
        &self,
        user: UserId,
        account_id: &AccountId,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        validate_amount(amount)?;
        self.resolver.resolve_owned(user, account_id)?;

        self.store.with_account_mut(account_id, |account| {
            AccountResolver::ensure_owned(user, account)?;
            if account.balance < amount {
                return Err(LedgerError::insufficient_funds(
                    &account.id,
                    account.balance,
                    amount,
                ));
            }
            account.balance = account
                .balance
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::arithmetic_overflow("withdrawal", &account.id))?;
            Ok(())
        })?;

        self.recorder.record(
            user,
            MovementKind::Withdrawal,
            -amount,
            WITHDRAWAL_DESCRIPTION.to_string(),
        )
    }

    /// Transfer funds out of the user's primary account
    ///
    /// Debits the first-listed account by `request.amount` and records a
    /// Transfer entry with a negative signed amount. The destination is an
    /// opaque label; no credit leg is applied to any other account.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - `request.amount <= 0`
    /// * `InsufficientFunds` - primary balance cannot cover the amount
    /// * `UserNotFound` - the user does not exist
    /// * `NoPrimaryAccount` - the user owns no accounts
    pub fn transfer(
        &self,
        user: UserId,
        request: &TransferRequest,
    ) -> Result<Transaction, LedgerError> {
        validate_amount(request.amount)?;

        let record = self
            .store
            .get_user(user)
            .ok_or_else(|| LedgerError::user_not_found(user))?;
        let primary = record
            .account_ids
            .first()
            .cloned()
            .ok_or_else(|| LedgerError::no_primary_account(user))?;

        self.store.with_account_mut(&primary, |account| {
            AccountResolver::ensure_owned(user, account)?;
            if account.balance < request.amount {
                return Err(LedgerError::insufficient_funds(
                    &account.id,
                    account.balance,
                    request.amount,
                ));
            }
            account.balance = account
                .balance
                .checked_sub(request.amount)
                .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", &account.id))?;
            Ok(())
        })?;

        let description = format!("{} to {}", request.method.label(), request.destination);
        self.recorder
            .record(user, MovementKind::Transfer, -request.amount, description)
    }
}

/// Reject non-positive movement amounts
fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(())
}
