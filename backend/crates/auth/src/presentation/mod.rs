//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    AdminUser, CurrentUser, attach_identity, require_admin, require_authenticated,
};
pub use router::auth_router;
