//! Authentication support: credential hashing and session tokens
//!
//! The ledger core treats authentication as a collaborator; this module
//! supplies the two pieces it needs: Argon2id password hashing and an
//! in-process session registry issuing opaque tokens.

pub mod credentials;
pub mod session;

pub use credentials::{hash_password, verify_password};
pub use session::{Session, SessionRegistry};
