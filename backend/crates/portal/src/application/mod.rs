//! Application Layer
//!
//! Use cases over the portal repositories.

pub mod admin;
pub mod catalogue;
pub mod feedback;
pub mod forum;
pub mod modules;
pub mod progress;
pub mod schemes;
pub mod seed;

// Re-exports
pub use admin::AdminStatsUseCase;
pub use feedback::FeedbackUseCase;
pub use forum::ForumUseCase;
pub use modules::ModuleUseCase;
pub use progress::ProgressUseCase;
pub use schemes::SchemeUseCase;
pub use seed::{SeedReport, SeedUseCase};
