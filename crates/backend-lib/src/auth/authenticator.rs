// ============================
// crates/backend-lib/src/auth/authenticator.rs
// ============================
//! Local-credential authentication against the user directory.
use std::sync::Arc;

use metrics::counter;
use zeroize::Zeroizing;

use crate::auth::password::PasswordHasher;
use crate::directory::{UserDirectory, UserRecord};
use crate::error::AppError;
use crate::metrics::{AUTH_LOGIN_FAILED, AUTH_LOGIN_OK};

/// Outcome of a login attempt.
///
/// The two failure variants are distinct internally (and in diagnostics)
/// but must render the same caller-facing message; see
/// [`AuthOutcome::into_user`].
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Success(UserRecord),
    InvalidCredentials,
    UserNotFound,
}

impl AuthOutcome {
    /// Collapse both failure variants into the single merged error so a
    /// response can never reveal whether the account exists.
    pub fn into_user(self) -> Result<UserRecord, AppError> {
        match self {
            AuthOutcome::Success(user) => Ok(user),
            AuthOutcome::InvalidCredentials | AuthOutcome::UserNotFound => {
                Err(AppError::AuthenticationFailed)
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }
}

/// Verifies (login name, password) pairs. Constructed with its directory
/// and hasher injected; there is no ambient process-wide strategy.
pub struct CredentialAuthenticator<D> {
    directory: Arc<D>,
    hasher: PasswordHasher,
}

impl<D> Clone for CredentialAuthenticator<D> {
    fn clone(&self) -> Self {
        Self { directory: Arc::clone(&self.directory), hasher: self.hasher }
    }
}

impl<D: UserDirectory> CredentialAuthenticator<D> {
    pub fn new(directory: Arc<D>, hasher: PasswordHasher) -> Self {
        Self { directory, hasher }
    }

    /// Verify a credential pair against the directory.
    ///
    /// This is the single point where plaintext credential material exists
    /// in memory; the buffer is zeroized when the verification task drops
    /// it. The record is not mutated and the plaintext is never logged.
    /// Verification runs on the blocking pool so the intentionally slow
    /// hash never stalls the request dispatcher.
    pub async fn authenticate(
        &self,
        login_name: &str,
        password: Zeroizing<String>,
    ) -> Result<AuthOutcome, AppError> {
        let Some(user) = self.directory.find_by_login_name(login_name).await? else {
            counter!(AUTH_LOGIN_FAILED).increment(1);
            tracing::debug!(login_name, "login attempt for unknown account");
            return Ok(AuthOutcome::UserNotFound);
        };

        let hasher = self.hasher;
        let stored = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| AppError::Internal(format!("verification task failed: {e}")))??;

        if matches {
            counter!(AUTH_LOGIN_OK).increment(1);
            Ok(AuthOutcome::Success(user))
        } else {
            counter!(AUTH_LOGIN_FAILED).increment(1);
            tracing::debug!(login_name, "password mismatch");
            Ok(AuthOutcome::InvalidCredentials)
        }
    }
}
