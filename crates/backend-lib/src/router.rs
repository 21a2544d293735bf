// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router and JSON handlers for the membership API.
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use metrics::counter;
use tower_http::trace::TraceLayer;
use zeroize::Zeroizing;

use memberbook_common::{
    DeleteRequest, DeleteResponse, LoginRequest, LoginResponse, LogoutResponse, MemberProfile,
    RegisterRequest, RosterResponse, UpdateRequest,
};

use crate::auth::{guard, GuardDecision, SessionToken};
use crate::directory::{UserDirectory, UserRecord};
use crate::error::AppError;
use crate::members::{ProfileUpdate, Registration};
use crate::metrics::GUARD_DENIED;
use crate::AppState;

/// Create the API router
pub fn create_router<D: UserDirectory + 'static>(state: Arc<AppState<D>>) -> Router {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/logout", get(logout))
        .route("/users/members", get(members))
        .route("/users/update", post(update))
        .route("/users", delete(remove))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Pull the session token out of the bearer authorization header
fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let raw = value.strip_prefix("Bearer ")?;
    SessionToken::parse(raw.trim())
}

/// Resolve the request's session and gate on the result.
///
/// Resolution runs to completion before the handler proceeds; a denial
/// rejects the whole request with the login redirect.
async fn require_member<D: UserDirectory>(
    state: &AppState<D>,
    headers: &HeaderMap,
) -> Result<UserRecord, AppError> {
    let session = state.sessions.resolve(bearer_token(headers)).await;
    match guard(&session) {
        GuardDecision::Allow => session
            .into_user()
            .ok_or_else(|| AppError::Internal("authenticated session without a user".to_string())),
        GuardDecision::Deny { redirect_to } => {
            counter!(GUARD_DENIED).increment(1);
            Err(AppError::Unauthenticated { redirect_to })
        },
    }
}

/// Handler for member registration
async fn register<D: UserDirectory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MemberProfile>), AppError> {
    let registration = Registration {
        login_name: request.login_name,
        display_name: request.display_name,
        email: request.email,
        contact: request.contact,
        password: Zeroizing::new(request.password),
        profile_image: request.profile_image,
    };

    let record = state.members.register(registration).await?;
    Ok((StatusCode::CREATED, Json(record.profile())))
}

/// Handler for credential login
async fn login<D: UserDirectory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let outcome = state
        .authenticator
        .authenticate(&request.login_name, Zeroizing::new(request.password))
        .await?;

    // Both failure causes surface as the one merged message
    let user = outcome.into_user()?;
    let token = state.sessions.serialize(&user);

    tracing::info!(member = %user.external_id, "member logged in");
    Ok(Json(LoginResponse {
        token: token.to_string(),
        member: user.profile(),
    }))
}

/// Handler for logout. The token lives client-side; logging out is the
/// client discarding it, which returns the session to anonymous.
async fn logout() -> Json<LogoutResponse> {
    Json(LogoutResponse {
        message: "You are now logged out".to_string(),
    })
}

/// Handler for the member roster (protected)
async fn members<D: UserDirectory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    headers: HeaderMap,
) -> Result<Json<RosterResponse>, AppError> {
    require_member(&state, &headers).await?;

    let roster = state.members.roster().await?;
    Ok(Json(RosterResponse {
        members: roster.iter().map(UserRecord::profile).collect(),
    }))
}

/// Handler for profile updates (protected)
async fn update<D: UserDirectory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    headers: HeaderMap,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<MemberProfile>, AppError> {
    require_member(&state, &headers).await?;

    let update = ProfileUpdate {
        external_id: request.external_id,
        login_name: request.login_name,
        display_name: request.display_name,
        email: request.email,
        contact: request.contact,
        password: request.password.map(Zeroizing::new),
        profile_image: request.profile_image,
    };

    let record = state.members.update_profile(update).await?;
    Ok(Json(record.profile()))
}

/// Handler for member deletion (protected)
async fn remove<D: UserDirectory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    headers: HeaderMap,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, AppError> {
    require_member(&state, &headers).await?;

    let success = state.members.remove(request.user_id).await?;
    Ok(Json(DeleteResponse {
        success,
        user_id: request.user_id,
    }))
}
