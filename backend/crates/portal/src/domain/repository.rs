//! Repository Traits
//!
//! One PostgreSQL type implements all of them; handlers are generic over
//! [`PortalRepository`].

use kernel::id::{ForumPostId, ModuleId, UserId};

use crate::domain::entity::{
    AdminStats, Feedback, ForumComment, ForumCommentWithAuthor, ForumPost, ForumPostWithAuthor,
    GovernmentScheme, Module, NewFeedback, NewForumComment, NewForumPost, NewModule, NewScheme,
    ProgressUpdate, UserProgress,
};
use crate::error::PortalResult;

#[trait_variant::make(ModuleRepository: Send)]
pub trait LocalModuleRepository {
    /// Active modules, oldest first
    async fn list_active_modules(&self) -> PortalResult<Vec<Module>>;

    async fn find_module(&self, module_id: &ModuleId) -> PortalResult<Option<Module>>;

    async fn create_module(&self, module: NewModule) -> PortalResult<Module>;

    /// All modules, active or not
    async fn count_modules(&self) -> PortalResult<i64>;
}

#[trait_variant::make(ProgressRepository: Send)]
pub trait LocalProgressRepository {
    async fn list_progress(&self, user_id: &UserId) -> PortalResult<Vec<UserProgress>>;

    /// Insert or overwrite the row for `(user_id, module_id)` in one atomic
    /// step; concurrent calls for the same pair never create two rows.
    async fn upsert_progress(&self, update: &ProgressUpdate) -> PortalResult<UserProgress>;
}

#[trait_variant::make(ForumRepository: Send)]
pub trait LocalForumRepository {
    /// Posts with their author, newest first, optionally of one category
    async fn list_posts(&self, category: Option<&str>) -> PortalResult<Vec<ForumPostWithAuthor>>;

    async fn find_post(&self, post_id: &ForumPostId) -> PortalResult<Option<ForumPost>>;

    async fn create_post(&self, post: NewForumPost) -> PortalResult<ForumPost>;

    /// Atomic `likes + 1`. `false` when the post does not exist.
    async fn like_post(&self, post_id: &ForumPostId) -> PortalResult<bool>;

    /// Comments with their author, oldest first
    async fn list_comments(
        &self,
        post_id: &ForumPostId,
    ) -> PortalResult<Vec<ForumCommentWithAuthor>>;

    async fn create_comment(&self, comment: NewForumComment) -> PortalResult<ForumComment>;
}

#[trait_variant::make(FeedbackRepository: Send)]
pub trait LocalFeedbackRepository {
    async fn create_feedback(&self, feedback: NewFeedback) -> PortalResult<Feedback>;

    /// Everything, newest first
    async fn list_feedback(&self) -> PortalResult<Vec<Feedback>>;
}

#[trait_variant::make(SchemeRepository: Send)]
pub trait LocalSchemeRepository {
    /// Active schemes, most recently updated first
    async fn list_active_schemes(&self) -> PortalResult<Vec<GovernmentScheme>>;

    async fn create_scheme(&self, scheme: NewScheme) -> PortalResult<GovernmentScheme>;

    async fn count_schemes(&self) -> PortalResult<i64>;
}

#[trait_variant::make(StatsRepository: Send)]
pub trait LocalStatsRepository {
    async fn admin_stats(&self) -> PortalResult<AdminStats>;
}

/// Everything the portal routes need from storage
pub trait PortalRepository:
    ModuleRepository
    + ProgressRepository
    + ForumRepository
    + FeedbackRepository
    + SchemeRepository
    + StatsRepository
    + Sync
    + 'static
{
}

impl<T> PortalRepository for T where
    T: ModuleRepository
        + ProgressRepository
        + ForumRepository
        + FeedbackRepository
        + SchemeRepository
        + StatsRepository
        + Sync
        + 'static
{
}
