//! Collaborator-facing service: the contract consumed by UI/auth layers
//!
//! `BankService` composes the ledger store, movement engine, authorization
//! gate, and session registry behind the operation set callers see:
//! register, authenticate, fetch_profile, deposit, withdraw, transfer,
//! confirm_transfer, cancel_transfer.
//!
//! Callers always receive the password-free [`UserProfile`] view; stored
//! credential hashes never leave the store.

use crate::auth::{hash_password, verify_password, SessionRegistry};
use crate::core::{AuthorizationGate, CodeVerifier, LedgerStore, MovementEngine, TransferOutcome};
use crate::types::{
    Account, AccountId, AccountKind, ChallengeId, LedgerError, NewUserRequest, SessionId,
    TransferRequest, User, UserId, UserProfile,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Result of a transfer submission
///
/// Small transfers complete immediately; large ones come back as a
/// challenge the caller must confirm with a second-factor code.
#[derive(Debug, Clone)]
pub enum TransferResponse {
    /// The transfer applied; here is the updated view
    Completed(UserProfile),

    /// Step-up required; confirm with this token and a code
    ChallengeRequired(ChallengeId),
}

/// The banking ledger's external interface
///
/// Owns one [`LedgerStore`] (injected lifecycle: constructed here, shared by
/// reference with every component) plus the gate and session registry.
pub struct BankService {
    store: Arc<LedgerStore>,
    engine: Arc<MovementEngine>,
    gate: AuthorizationGate,
    sessions: SessionRegistry,
}

impl BankService {
    /// Create a service with the default step-up policy (threshold 1000,
    /// demo confirmation code)
    pub fn new() -> Self {
        let store = Arc::new(LedgerStore::new());
        let engine = Arc::new(MovementEngine::new(Arc::clone(&store)));
        let gate = AuthorizationGate::new(Arc::clone(&engine));
        BankService {
            store,
            engine,
            gate,
            sessions: SessionRegistry::new(),
        }
    }

    /// Create a service with an explicit step-up threshold and verifier
    pub fn with_policy(threshold: Decimal, verifier: Box<dyn CodeVerifier>) -> Self {
        let store = Arc::new(LedgerStore::new());
        let engine = Arc::new(MovementEngine::new(Arc::clone(&store)));
        let gate = AuthorizationGate::with_policy(Arc::clone(&engine), threshold, verifier);
        BankService {
            store,
            engine,
            gate,
            sessions: SessionRegistry::new(),
        }
    }

    /// Register a new user with two zero-balance accounts
    ///
    /// Creates a savings account (carrying the nominal interest rate) and a
    /// checking account, in that order; the savings account is the primary.
    ///
    /// # Errors
    ///
    /// * `MissingField` - any empty registration field
    /// * `DuplicateUsername` - the username is taken
    pub fn register(&self, request: NewUserRequest) -> Result<UserProfile, LedgerError> {
        require_field("username", &request.username)?;
        require_field("password", &request.password)?;
        require_field("name", &request.name)?;
        require_field("email", &request.email)?;

        let user_id = Uuid::new_v4();
        let savings = Account::new(format!("SA-{}", Uuid::new_v4()), user_id, AccountKind::Savings);
        let checking = Account::new(
            format!("CC-{}", Uuid::new_v4()),
            user_id,
            AccountKind::Checking,
        );

        let user = User {
            id: user_id,
            username: request.username.clone(),
            name: request.name,
            email: request.email,
            password_hash: hash_password(&request.password)?,
            account_ids: vec![savings.id.clone(), checking.id.clone()],
            transactions: vec![],
        };

        self.store.insert_user(user)?;
        self.store.insert_account(savings);
        self.store.insert_account(checking);

        info!(username = %request.username, "registered user");
        self.profile(user_id)
    }

    /// Authenticate a user and issue a session token
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` for unknown usernames and wrong
    /// passwords alike.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<SessionId, LedgerError> {
        let user = self
            .store
            .find_user_by_username(username)
            .ok_or(LedgerError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash) {
            return Err(LedgerError::InvalidCredentials);
        }

        info!(username = %username, "authenticated user");
        Ok(self.sessions.issue(user.id))
    }

    /// Fetch the caller's profile (accounts + newest-first history)
    pub fn fetch_profile(&self, session: SessionId) -> Result<UserProfile, LedgerError> {
        let user = self.sessions.resolve(session)?;
        self.profile(user)
    }

    /// Deposit into one of the caller's accounts
    pub fn deposit(
        &self,
        session: SessionId,
        account_id: &AccountId,
        amount: Decimal,
    ) -> Result<UserProfile, LedgerError> {
        let user = self.sessions.resolve(session)?;
        self.engine.deposit(user, account_id, amount)?;
        info!(account = %account_id, %amount, "deposit applied");
        self.profile(user)
    }

    /// Withdraw from one of the caller's accounts
    pub fn withdraw(
        &self,
        session: SessionId,
        account_id: &AccountId,
        amount: Decimal,
    ) -> Result<UserProfile, LedgerError> {
        let user = self.sessions.resolve(session)?;
        self.engine.withdraw(user, account_id, amount)?;
        info!(account = %account_id, %amount, "withdrawal applied");
        self.profile(user)
    }

    /// Submit a transfer; large amounts come back as a challenge
    pub fn transfer(
        &self,
        session: SessionId,
        request: TransferRequest,
    ) -> Result<TransferResponse, LedgerError> {
        let user = self.sessions.resolve(session)?;
        match self.gate.submit(session, user, request)? {
            TransferOutcome::Completed(tx) => {
                info!(amount = %tx.amount, "transfer applied");
                Ok(TransferResponse::Completed(self.profile(user)?))
            }
            TransferOutcome::ChallengeRequired(challenge) => {
                info!("transfer requires step-up confirmation");
                Ok(TransferResponse::ChallengeRequired(challenge))
            }
        }
    }

    /// Confirm an outstanding transfer challenge
    ///
    /// # Errors
    ///
    /// `CodeMismatch` leaves the challenge open; `NoPendingChallenge` means
    /// nothing (or a stale token) is outstanding.
    pub fn confirm_transfer(
        &self,
        session: SessionId,
        challenge: ChallengeId,
        code: &str,
    ) -> Result<UserProfile, LedgerError> {
        let user = self.sessions.resolve(session)?;
        let tx = self.gate.confirm(session, challenge, code)?;
        info!(amount = %tx.amount, "confirmed transfer applied");
        self.profile(user)
    }

    /// Cancel the caller's outstanding transfer challenge
    pub fn cancel_transfer(&self, session: SessionId) -> Result<(), LedgerError> {
        self.sessions.resolve(session)?;
        self.gate.cancel(session)
    }

    /// Snapshot all user profiles, sorted by username
    ///
    /// Used for summary/reporting output.
    pub fn summaries(&self) -> Vec<UserProfile> {
        self.store
            .get_all_users()
            .into_iter()
            .map(|user| self.assemble(user))
            .collect()
    }

    /// Assemble the password-free view for one user
    fn profile(&self, user: UserId) -> Result<UserProfile, LedgerError> {
        let record = self
            .store
            .get_user(user)
            .ok_or_else(|| LedgerError::user_not_found(user))?;
        Ok(self.assemble(record))
    }

    fn assemble(&self, record: User) -> UserProfile {
        let accounts = record
            .account_ids
            .iter()
            .filter_map(|id| self.store.get_account(id))
            .collect();
        UserProfile {
            id: record.id,
            username: record.username,
            name: record.name,
            email: record.email,
            accounts,
            transactions: record.transactions,
        }
    }
}

impl Default for BankService {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject empty registration fields
fn require_field(name: &str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::missing_field(name));
    }
    Ok(())
}
