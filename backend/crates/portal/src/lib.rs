//! Portal Backend Module
//!
//! Learning modules, per-user progress, the community forum, feedback,
//! government schemes and the admin dashboard.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities and repository traits
//! - `application/` - Use cases and default content
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Identity comes from the `auth` crate: routes here only read the
//! `Identity` that `auth::attach_identity` placed on the request.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::{SeedReport, SeedUseCase};
pub use domain::PortalRepository;
pub use error::{PortalError, PortalResult};
pub use infra::PgPortalRepository;
pub use presentation::{PortalAppState, portal_router};
