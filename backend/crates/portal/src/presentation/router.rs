//! Portal Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use auth::{require_admin, require_authenticated};

use crate::domain::repository::PortalRepository;
use crate::presentation::handlers::{self, PortalAppState};

/// Content, forum, progress, feedback and admin routes.
///
/// Guards read the identity attached by `auth::attach_identity`, which the
/// caller layers over the whole API. Paths that mix public and signed-in
/// methods are guarded by the `CurrentUser` extractor in the handler.
pub fn portal_router<R>(state: PortalAppState<R>) -> Router
where
    R: PortalRepository,
{
    let public = Router::new()
        .route("/modules", get(handlers::list_modules::<R>))
        .route("/modules/{id}", get(handlers::get_module::<R>))
        .route(
            "/forum/posts",
            get(handlers::list_posts::<R>).post(handlers::create_post::<R>),
        )
        .route(
            "/forum/posts/{id}/comments",
            get(handlers::list_comments::<R>).post(handlers::create_comment::<R>),
        )
        .route("/feedback", post(handlers::submit_feedback::<R>))
        .route("/schemes", get(handlers::list_schemes::<R>));

    let member = Router::new()
        .route("/forum/posts/{id}/like", post(handlers::like_post::<R>))
        .route(
            "/progress",
            get(handlers::list_progress::<R>).post(handlers::record_progress::<R>),
        )
        .route_layer(middleware::from_fn(require_authenticated));

    let admin = Router::new()
        .route("/stats", get(handlers::admin_stats::<R>))
        .route("/feedback", get(handlers::admin_feedback::<R>))
        .route_layer(middleware::from_fn(require_admin));

    public
        .merge(member)
        .nest("/admin", admin)
        .with_state(state)
}
