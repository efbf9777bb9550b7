//! Domain Layer
//!
//! Contains entities and repository traits.

pub mod entity;
pub mod repository;

// Re-exports
pub use repository::{
    FeedbackRepository, ForumRepository, ModuleRepository, PortalRepository, ProgressRepository,
    SchemeRepository, StatsRepository,
};
