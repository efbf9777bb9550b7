//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Users, sessions, identity and access rules, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Registration and login with email + password
//! - Server-side sessions behind a signed, HttpOnly cookie (24 h, not sliding)
//! - Durable (PostgreSQL) or ephemeral (in-memory) session storage
//! - Per-request identity resolution and admin / signed-in route guards
//!
//! ## Security Model
//! - Passwords derived with Argon2id and compared in constant time
//! - Unknown email and wrong password fail identically, at the same cost
//! - Session ids are random UUIDs bound to an HMAC signature

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::{Access, Identity, SessionStore, User, UserRepository, authorize};
pub use error::{AuthError, AuthResult};
pub use infra::{
    MemorySessionStore, PgSessionStore, PgUserRepository, SESSION_CLEANUP_INTERVAL, SessionBackend,
    spawn_session_cleanup,
};
pub use presentation::{
    AdminUser, AuthAppState, CurrentUser, attach_identity, auth_router, require_admin,
    require_authenticated,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
