//! Authorization gate: step-up authentication for large transfers
//!
//! Transfers above a threshold require a second-factor confirmation before
//! the movement engine executes them. The gate is a per-session two-state
//! machine:
//!
//! - **Idle**: no challenge outstanding. A transfer at or below the
//!   threshold bypasses the gate entirely; one above it captures the request
//!   and returns a challenge instead of executing.
//! - **AwaitingConfirmation**: a captured request is pending. A matching
//!   code executes exactly the captured request; a mismatched code leaves
//!   the state pending (retryable); only an explicit cancel or a successful
//!   confirmation clears it.
//!
//! Only one challenge may be outstanding per session; a new transfer while
//! one is pending is rejected with a conflict rather than silently
//! overwriting the captured request.

use crate::core::movement::MovementEngine;
use crate::types::{
    ChallengeId, LedgerError, SessionId, Transaction, TransferRequest, UserId,
};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// Transfers strictly above this amount require step-up confirmation
pub const STEP_UP_THRESHOLD: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Demo confirmation code accepted by the default verifier
pub const DEMO_CONFIRMATION_CODE: &str = "123456";

/// Second-factor code check, pluggable behind the gate
///
/// The gate's state machine never inspects codes itself; swapping in a real
/// verifier (TOTP, SMS, push) changes nothing about challenge lifecycle.
pub trait CodeVerifier: Send + Sync {
    /// Return true if the supplied code is acceptable
    fn verify(&self, code: &str) -> bool;
}

/// Fixed-code verifier standing in for a real second factor
pub struct StaticCodeVerifier {
    expected: String,
}

impl StaticCodeVerifier {
    /// Create a verifier accepting exactly `expected`
    pub fn new(expected: impl Into<String>) -> Self {
        StaticCodeVerifier {
            expected: expected.into(),
        }
    }

    /// Create the demo verifier (code `123456`)
    pub fn demo() -> Self {
        Self::new(DEMO_CONFIRMATION_CODE)
    }
}

impl CodeVerifier for StaticCodeVerifier {
    fn verify(&self, code: &str) -> bool {
        code == self.expected
    }
}

/// A captured transfer request awaiting second-factor confirmation
///
/// Ephemeral and session-scoped; consumed (applied or discarded) by a single
/// confirm/cancel decision and never persisted beyond it.
#[derive(Debug, Clone)]
pub struct PendingAuthorization {
    /// Token the caller must echo back on confirm
    pub challenge: ChallengeId,

    /// User the request was captured for
    pub user: UserId,

    /// The request exactly as originally submitted
    pub request: TransferRequest,
}

/// Result of submitting a transfer through the gate
#[derive(Debug, Clone)]
pub enum TransferOutcome {
    /// The transfer executed immediately (at or below the threshold)
    Completed(Transaction),

    /// The transfer was captured; confirm with this token and a code
    ChallengeRequired(ChallengeId),
}

/// Intercepts transfers above the threshold and demands confirmation
pub struct AuthorizationGate {
    engine: Arc<MovementEngine>,
    verifier: Box<dyn CodeVerifier>,
    threshold: Decimal,

    /// One outstanding challenge per session at most
    pending: DashMap<SessionId, PendingAuthorization>,
}

impl AuthorizationGate {
    /// Create a gate with the default threshold and demo verifier
    pub fn new(engine: Arc<MovementEngine>) -> Self {
        Self::with_policy(engine, STEP_UP_THRESHOLD, Box::new(StaticCodeVerifier::demo()))
    }

    /// Create a gate with an explicit threshold and verifier
    pub fn with_policy(
        engine: Arc<MovementEngine>,
        threshold: Decimal,
        verifier: Box<dyn CodeVerifier>,
    ) -> Self {
        AuthorizationGate {
            engine,
            verifier,
            threshold,
            pending: DashMap::new(),
        }
    }

    /// Submit a transfer request for the given session
    ///
    /// Amounts at or below the threshold execute immediately; amounts above
    /// it are captured and a challenge is returned with balances untouched.
    /// The conflict check and the capture are a single entry operation, so
    /// concurrent submits for one session can never overwrite each other's
    /// captured request.
    ///
    /// # Errors
    ///
    /// * `ChallengeConflict` - a challenge is already outstanding for this
    ///   session; the outstanding request is untouched
    /// * `InvalidAmount` - non-positive amount (checked before a challenge
    ///   is issued)
    /// * `InsufficientFunds` / movement errors - for the immediate path
    pub fn submit(
        &self,
        session: SessionId,
        user: UserId,
        request: TransferRequest,
    ) -> Result<TransferOutcome, LedgerError> {
        if self.pending.contains_key(&session) {
            return Err(LedgerError::ChallengeConflict);
        }
        if request.amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(request.amount));
        }

        if request.amount > self.threshold {
            let challenge = Uuid::new_v4();
            let claimed = self
                .pending
                .entry(session)
                .or_insert_with(|| PendingAuthorization {
                    challenge,
                    user,
                    request,
                })
                .challenge;
            if claimed != challenge {
                return Err(LedgerError::ChallengeConflict);
            }
            return Ok(TransferOutcome::ChallengeRequired(challenge));
        }

        let tx = self.engine.transfer(user, &request)?;
        Ok(TransferOutcome::Completed(tx))
    }

    /// Confirm an outstanding challenge with a second-factor code
    ///
    /// On a matching code the captured request is consumed and executed
    /// exactly as captured. On a mismatch the challenge stays open so the
    /// caller may retry. The challenge is consumed even if the transfer
    /// itself then fails (a decision was made); it is not re-armed.
    ///
    /// Consumption is a single conditional removal: of any number of
    /// concurrent confirms for the same challenge, exactly one obtains the
    /// capture and executes it; the rest see `NoPendingChallenge`.
    ///
    /// # Errors
    ///
    /// * `NoPendingChallenge` - nothing outstanding, or a stale/foreign
    ///   challenge token
    /// * `CodeMismatch` - wrong code; state preserved
    /// * movement errors from executing the captured transfer
    pub fn confirm(
        &self,
        session: SessionId,
        challenge: ChallengeId,
        code: &str,
    ) -> Result<Transaction, LedgerError> {
        {
            let entry = self
                .pending
                .get(&session)
                .ok_or(LedgerError::NoPendingChallenge)?;
            if entry.challenge != challenge {
                return Err(LedgerError::NoPendingChallenge);
            }
            if !self.verifier.verify(code) {
                return Err(LedgerError::CodeMismatch);
            }
        }

        let (_, pending) = self
            .pending
            .remove_if(&session, |_, p| p.challenge == challenge)
            .ok_or(LedgerError::NoPendingChallenge)?;
        self.engine.transfer(pending.user, &pending.request)
    }

    /// Discard the session's outstanding challenge, if any
    ///
    /// # Errors
    ///
    /// Returns `NoPendingChallenge` if nothing is outstanding.
    pub fn cancel(&self, session: SessionId) -> Result<(), LedgerError> {
        self.pending
            .remove(&session)
            .map(|_| ())
            .ok_or(LedgerError::NoPendingChallenge)
    }
}
