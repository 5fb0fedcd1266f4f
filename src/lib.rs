//! Banking Ledger Library
//! # Overview
//!
//! An in-memory banking ledger with account movements, a 2FA step-up gate
//! for large transfers, and a CSV script harness for driving it end to end.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (User, Account, Transaction, errors)
//! - [`auth`] - Password hashing and session tokens
//! - [`core`] - Business logic components:
//!   - [`core::store`] - The single owner of mutable ledger state
//!   - [`core::resolver`] - Account lookup and ownership checks
//!   - [`core::recorder`] - Movement history recording
//!   - [`core::movement`] - Deposit, withdrawal, and transfer execution
//!   - [`core::gate`] - Step-up confirmation for large transfers
//! - [`service`] - The collaborator-facing `BankService` interface
//! - [`io`] - Script input and summary output
//! - [`cli`] - CLI argument parsing
//!
//! # Movements
//!
//! The ledger supports three movement kinds:
//!
//! - **Deposit**: Credit funds to one of the caller's accounts
//! - **Withdrawal**: Debit funds (requires sufficient balance)
//! - **Transfer**: Debit the caller's primary account toward an external
//!   destination; amounts above the step-up threshold require a second
//!   confirmation with a verification code
//!
//! Every completed movement appends exactly one signed history entry, and
//! balances never go negative.

// Module declarations
pub mod auth;
pub mod cli;
pub mod core;
pub mod io;
pub mod service;
pub mod types;

pub use crate::core::{AuthorizationGate, LedgerStore, MovementEngine, TransferOutcome};
pub use io::write_summary_csv;
pub use service::{BankService, TransferResponse};
pub use types::{
    Account, AccountId, AccountKind, ChallengeId, LedgerError, MovementKind, SessionId,
    Transaction, TransactionId, TransferMethod, TransferRequest, User, UserId, UserProfile,
};
