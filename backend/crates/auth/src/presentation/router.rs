//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::{SessionStore, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Account routes: `/register`, `/login`, `/logout`, `/user`.
///
/// `/user` needs the identity attached by
/// [`attach_identity`](crate::presentation::middleware::attach_identity),
/// which the caller layers over the whole API.
pub fn auth_router<U, S>(state: AuthAppState<U, S>) -> Router
where
    U: UserRepository + Sync + 'static,
    S: SessionStore + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<U, S>))
        .route("/login", post(handlers::login::<U, S>))
        .route("/logout", post(handlers::logout::<U, S>))
        .route("/user", get(handlers::current_user))
        .with_state(state)
}
