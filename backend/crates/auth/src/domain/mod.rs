//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod identity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Session, SessionData, User, UserProfile};
pub use identity::{Access, Identity, authorize};
pub use repository::{SessionStore, UserRepository};
