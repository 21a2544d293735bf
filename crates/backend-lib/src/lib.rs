// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the Memberbook membership server.

pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod members;
pub mod metrics;
pub mod router;
pub mod validation;

use std::sync::Arc;

use crate::auth::{CredentialAuthenticator, PasswordHasher, SessionIdentityCodec};
use crate::config::Settings;
use crate::directory::UserDirectory;
use crate::error::AppError;
use crate::members::MemberService;

/// Application state shared across all handlers.
///
/// Every service gets its directory and hasher injected here; nothing is
/// registered process-wide.
pub struct AppState<D> {
    /// User-record store
    pub directory: Arc<D>,
    /// Credential verification
    pub authenticator: CredentialAuthenticator<D>,
    /// Registration and profile maintenance
    pub members: MemberService<D>,
    /// Session token serialization and per-request resolution
    pub sessions: SessionIdentityCodec<D>,
    /// Settings manager
    pub settings: Arc<Settings>,
}

impl<D> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            authenticator: self.authenticator.clone(),
            members: self.members.clone(),
            sessions: self.sessions.clone(),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<D: UserDirectory> AppState<D> {
    /// Create a new application state
    pub fn new(directory: D, settings: Settings) -> Result<Self, AppError> {
        let directory = Arc::new(directory);
        let hasher = PasswordHasher::new(settings.scrypt_log_n)?;

        Ok(Self {
            authenticator: CredentialAuthenticator::new(Arc::clone(&directory), hasher),
            members: MemberService::new(Arc::clone(&directory), hasher),
            sessions: SessionIdentityCodec::new(Arc::clone(&directory)),
            directory,
            settings: Arc::new(settings),
        })
    }
}
