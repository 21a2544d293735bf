// ============================
// crates/backend-lib/src/auth/guard.rs
// ============================
//! Per-request access decision for protected operations.
use crate::auth::session::SessionState;

/// Login entry point denied requests are pointed at
pub const LOGIN_REDIRECT: &str = "/users/login";

/// Outcome of the access decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Deny { redirect_to: &'static str },
}

/// Gate a protected operation on the already-resolved session state.
///
/// Pure over the state: the directory lookup happened during session
/// resolution and is not repeated here.
pub fn guard(state: &SessionState) -> GuardDecision {
    if state.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::Deny { redirect_to: LOGIN_REDIRECT }
    }
}
