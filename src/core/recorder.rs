//! Transaction recording for completed movements
//!
//! The recorder appends exactly one immutable history entry per completed
//! movement, preserving reverse-chronological order. Identifier assignment
//! is delegated to the store's monotone counter so ids are unique and never
//! reused.

use crate::core::store::LedgerStore;
use crate::types::{LedgerError, MovementKind, Transaction, UserId};
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Appends history entries for completed movements
pub struct TransactionRecorder {
    store: Arc<LedgerStore>,
}

impl TransactionRecorder {
    /// Create a recorder over the given store
    pub fn new(store: Arc<LedgerStore>) -> Self {
        TransactionRecorder { store }
    }

    /// Record a completed movement in the user's history
    ///
    /// `amount` is the signed net balance delta that was applied (positive
    /// for credits, negative for debits). The entry is stamped with today's
    /// date (date granularity) and prepended, keeping the history newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not exist. Movements only
    /// call this after resolving the user, so in practice this indicates a
    /// caller bug rather than a runtime condition.
    pub fn record(
        &self,
        user: UserId,
        kind: MovementKind,
        amount: Decimal,
        description: String,
    ) -> Result<Transaction, LedgerError> {
        let tx = Transaction {
            id: self.store.next_transaction_id(),
            user,
            date: Utc::now().date_naive(),
            description,
            amount,
            kind,
        };
        self.store.append_transaction(user, tx.clone())?;
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::User;
    use uuid::Uuid;

    fn store_with_user() -> (Arc<LedgerStore>, UserId) {
        let store = Arc::new(LedgerStore::new());
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            account_ids: vec![],
            transactions: vec![],
        };
        let id = user.id;
        store.insert_user(user).unwrap();
        (store, id)
    }

    #[test]
    fn test_record_appends_exactly_one_entry() {
        let (store, user) = store_with_user();
        let recorder = TransactionRecorder::new(Arc::clone(&store));

        let tx = recorder
            .record(
                user,
                MovementKind::Deposit,
                Decimal::new(50000, 2),
                "Balance deposit".to_string(),
            )
            .unwrap();

        let history = store.get_user(user).unwrap().transactions;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], tx);
        assert_eq!(history[0].amount, Decimal::new(50000, 2));
    }

    #[test]
    fn test_record_orders_newest_first_with_monotone_ids() {
        let (store, user) = store_with_user();
        let recorder = TransactionRecorder::new(Arc::clone(&store));

        let first = recorder
            .record(
                user,
                MovementKind::Deposit,
                Decimal::ONE,
                "Balance deposit".to_string(),
            )
            .unwrap();
        let second = recorder
            .record(
                user,
                MovementKind::Withdrawal,
                -Decimal::ONE,
                "Cash withdrawal".to_string(),
            )
            .unwrap();

        assert!(second.id > first.id);

        let history = store.get_user(user).unwrap().transactions;
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
    }

    #[test]
    fn test_record_for_unknown_user_fails() {
        let (store, _) = store_with_user();
        let recorder = TransactionRecorder::new(store);

        let result = recorder.record(
            Uuid::new_v4(),
            MovementKind::Deposit,
            Decimal::ONE,
            "Balance deposit".to_string(),
        );
        assert!(matches!(
            result.unwrap_err(),
            LedgerError::UserNotFound { .. }
        ));
    }
}
