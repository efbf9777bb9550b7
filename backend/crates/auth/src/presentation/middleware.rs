//! Auth Middleware
//!
//! `attach_identity` resolves the session cookie once per request and stores
//! the resulting [`Identity`] in the request extensions. The guards and
//! extractors below only read that extension.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::Extensions;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::ResolveIdentityUseCase;
use crate::domain::entity::user::User;
use crate::domain::identity::{Access, Identity, authorize};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Resolve the caller and attach the identity to the request.
///
/// Store failures answer 500 instead of silently treating the caller as
/// anonymous.
pub async fn attach_identity<U, S>(
    State(state): State<AuthAppState<U, S>>,
    mut req: Request,
    next: Next,
) -> Response
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = ResolveIdentityUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    match use_case.execute(token.as_deref()).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

/// Requests that bypassed `attach_identity` count as anonymous.
fn identity_of(extensions: &Extensions) -> Identity {
    extensions.get::<Identity>().cloned().unwrap_or_default()
}

/// Guard: any signed-in user (401 otherwise)
pub async fn require_authenticated(req: Request, next: Next) -> Result<Response, AuthError> {
    guard(req, next, Access::Authenticated).await
}

/// Guard: admins only (403 otherwise, including for anonymous callers)
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    guard(req, next, Access::Admin).await
}

async fn guard(req: Request, next: Next, access: Access) -> Result<Response, AuthError> {
    authorize(&identity_of(req.extensions()), access)?;
    Ok(next.run(req).await)
}

/// The signed-in user. Rejects with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Arc<User>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = identity_of(&parts.extensions);
        authorize(&identity, Access::Authenticated).map(|user| Self(user.clone()))
    }
}

/// A signed-in admin. Rejects with 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Arc<User>);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = identity_of(&parts.extensions);
        authorize(&identity, Access::Admin).map(|user| Self(user.clone()))
    }
}
