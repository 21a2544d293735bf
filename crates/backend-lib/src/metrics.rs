// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const MEMBER_REGISTERED: &str = "member.registered";
pub const MEMBER_UPDATED: &str = "member.updated";
pub const MEMBER_DELETED: &str = "member.deleted";
pub const AUTH_LOGIN_OK: &str = "auth.login.ok";
pub const AUTH_LOGIN_FAILED: &str = "auth.login.failed";
pub const SESSION_RESOLUTION_FAILED: &str = "session.resolution_failed";
pub const GUARD_DENIED: &str = "guard.denied";
