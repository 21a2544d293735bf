// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod authenticator;
pub mod guard;
pub mod password;
pub mod session;

pub use authenticator::{AuthOutcome, CredentialAuthenticator};
pub use guard::{guard, GuardDecision, LOGIN_REDIRECT};
pub use password::PasswordHasher;
pub use session::{SessionIdentityCodec, SessionState, SessionToken};
