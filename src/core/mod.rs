//! Core business logic module
//!
//! This module contains the ledger's core components:
//! - `store` - The ledger store, sole owner of mutable state
//! - `resolver` - Account lookup and ownership validation
//! - `recorder` - Append-only transaction history recording
//! - `movement` - Deposit, withdrawal, and transfer operations
//! - `gate` - Step-up authorization for large transfers

pub mod gate;
pub mod movement;
pub mod recorder;
pub mod resolver;
pub mod store;

pub use gate::{
    AuthorizationGate, CodeVerifier, PendingAuthorization, StaticCodeVerifier, TransferOutcome,
    DEMO_CONFIRMATION_CODE, STEP_UP_THRESHOLD,
};
pub use movement::MovementEngine;
pub use recorder::TransactionRecorder;
pub use resolver::AccountResolver;
pub use store::LedgerStore;
