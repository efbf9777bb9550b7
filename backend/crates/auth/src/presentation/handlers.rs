//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use kernel::extract::ValidJson;
use std::sync::Arc;

use platform::cookie::{extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{LoginUseCase, LogoutUseCase, RegisterUseCase};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{LoginRequest, MessageResponse, RegisterRequest, UserResponse};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers and the identity middleware
pub struct AuthAppState<U, S>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<U, S> AuthAppState<U, S>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    pub fn new(users: U, sessions: S, config: AuthConfig) -> Self {
        Self {
            users: Arc::new(users),
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        }
    }
}

impl<U, S> Clone for AuthAppState<U, S>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register
pub async fn register<U, S>(
    State(state): State<AuthAppState<U, S>>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let input = req.validate()?;

    let use_case = RegisterUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(input).await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
        Json(UserResponse::from(&output.user)),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<U, S>(
    State(state): State<AuthAppState<U, S>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(req.into()).await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
        Json(UserResponse::from(&output.user)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/logout
///
/// Always 200; the cookie is cleared even when the store could not be
/// reached.
pub async fn logout<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = LogoutUseCase::new(state.sessions.clone(), state.config.clone());
    if let Err(e) = use_case.execute(token.as_deref()).await {
        tracing::warn!(error = %e, "Failed to destroy session on logout");
    }

    let cookie = state.config.session_cookie().build_delete_cookie();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
        Json(MessageResponse::new("Logged out successfully")),
    )
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/user
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.as_ref()))
}
