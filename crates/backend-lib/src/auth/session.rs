// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session identity serialization and per-request resolution.
use std::fmt;
use std::sync::Arc;

use memberbook_common::MemberId;
use metrics::counter;

use crate::directory::{UserDirectory, UserRecord};
use crate::error::AppError;
use crate::metrics::SESSION_RESOLUTION_FAILED;

/// Opaque session identity carried by the client between requests.
///
/// The durable content is the internal id of the authenticated record and
/// nothing more: the token is meaningful only while the directory can
/// resolve it. Transport (cookie, header) is the host layer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(MemberId);

impl SessionToken {
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok().map(SessionToken)
    }

    pub fn member_id(&self) -> MemberId {
        self.0
    }
}

impl From<MemberId> for SessionToken {
    fn from(id: MemberId) -> Self {
        SessionToken(id)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-request authentication state.
///
/// `Anonymous` -> `PendingAuthentication` (credentials submitted) ->
/// `Authenticated` (token resolves to a record) -> `Anonymous` (explicit
/// logout clears the token; resolution failure also degrades here).
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    PendingAuthentication,
    Authenticated(UserRecord),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn into_user(self) -> Option<UserRecord> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Maps an authenticated user to its durable session token and resolves
/// the token back to a full record on each subsequent request.
pub struct SessionIdentityCodec<D> {
    directory: Arc<D>,
}

impl<D> Clone for SessionIdentityCodec<D> {
    fn clone(&self) -> Self {
        Self { directory: Arc::clone(&self.directory) }
    }
}

impl<D: UserDirectory> SessionIdentityCodec<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Produce the durable token for an authenticated user. Called once,
    /// immediately after a successful authentication.
    pub fn serialize(&self, user: &UserRecord) -> SessionToken {
        SessionToken(user.internal_id)
    }

    /// Resolve a token back to its record. A miss is `Ok(None)`: the
    /// caller treats the session as anonymous instead of failing the
    /// request.
    pub async fn deserialize(
        &self,
        token: SessionToken,
    ) -> Result<Option<UserRecord>, AppError> {
        self.directory.find_by_internal_id(token.0).await
    }

    /// Resolve the request's session state before the request proceeds.
    ///
    /// A token the directory can no longer resolve voids the session: the
    /// state degrades to `Anonymous` and is never retried or repaired.
    pub async fn resolve(&self, token: Option<SessionToken>) -> SessionState {
        let Some(token) = token else {
            return SessionState::Anonymous;
        };

        match self.deserialize(token).await {
            Ok(Some(user)) => SessionState::Authenticated(user),
            Ok(None) => {
                counter!(SESSION_RESOLUTION_FAILED).increment(1);
                tracing::debug!(%token, "session token no longer resolves to a record");
                SessionState::Anonymous
            },
            Err(err) => {
                counter!(SESSION_RESOLUTION_FAILED).increment(1);
                tracing::warn!(%token, error = %err, "session resolution failed");
                SessionState::Anonymous
            },
        }
    }
}
