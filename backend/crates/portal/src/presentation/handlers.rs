//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::ValidJson;
use std::sync::Arc;

use auth::models::MessageResponse;
use auth::{AdminUser, CurrentUser};

use crate::application::forum::parse_post_id;
use crate::application::{
    AdminStatsUseCase, FeedbackUseCase, ForumUseCase, ModuleUseCase, ProgressUseCase,
    SchemeUseCase,
};
use crate::domain::entity::{
    AdminStats, Feedback, ForumCommentWithAuthor, ForumPostWithAuthor, GovernmentScheme, Module,
    UserProgress,
};
use crate::domain::repository::PortalRepository;
use crate::error::PortalResult;
use crate::presentation::dto::{
    CreateCommentRequest, CreatePostRequest, FeedbackRequest, PostFilter, ProgressRequest,
};

/// Shared state for portal handlers
pub struct PortalAppState<R>
where
    R: PortalRepository,
{
    pub repo: Arc<R>,
}

impl<R> PortalAppState<R>
where
    R: PortalRepository,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

impl<R> Clone for PortalAppState<R>
where
    R: PortalRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Modules
// ============================================================================

/// GET /api/modules
pub async fn list_modules<R>(
    State(state): State<PortalAppState<R>>,
) -> PortalResult<Json<Vec<Module>>>
where
    R: PortalRepository,
{
    let modules = ModuleUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(modules))
}

/// GET /api/modules/{id}
pub async fn get_module<R>(
    State(state): State<PortalAppState<R>>,
    Path(id): Path<String>,
) -> PortalResult<Json<Module>>
where
    R: PortalRepository,
{
    let module = ModuleUseCase::new(state.repo.clone()).get(&id).await?;
    Ok(Json(module))
}

// ============================================================================
// Forum
// ============================================================================

/// GET /api/forum/posts?category=
pub async fn list_posts<R>(
    State(state): State<PortalAppState<R>>,
    Query(filter): Query<PostFilter>,
) -> PortalResult<Json<Vec<ForumPostWithAuthor>>>
where
    R: PortalRepository,
{
    let posts = ForumUseCase::new(state.repo.clone())
        .list_posts(filter.category.as_deref())
        .await?;
    Ok(Json(posts))
}

/// POST /api/forum/posts
pub async fn create_post<R>(
    State(state): State<PortalAppState<R>>,
    CurrentUser(user): CurrentUser,
    ValidJson(req): ValidJson<CreatePostRequest>,
) -> PortalResult<impl IntoResponse>
where
    R: PortalRepository,
{
    let input = req.validate(user.id)?;
    let post = ForumUseCase::new(state.repo.clone()).create_post(input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/forum/posts/{id}/comments
pub async fn list_comments<R>(
    State(state): State<PortalAppState<R>>,
    Path(id): Path<String>,
) -> PortalResult<Json<Vec<ForumCommentWithAuthor>>>
where
    R: PortalRepository,
{
    let comments = ForumUseCase::new(state.repo.clone())
        .list_comments(&id)
        .await?;
    Ok(Json(comments))
}

/// POST /api/forum/posts/{id}/comments
pub async fn create_comment<R>(
    State(state): State<PortalAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<CreateCommentRequest>,
) -> PortalResult<impl IntoResponse>
where
    R: PortalRepository,
{
    let post_id = parse_post_id(&id)?;
    let input = req.validate(post_id, user.id)?;
    let comment = ForumUseCase::new(state.repo.clone())
        .add_comment(input)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// POST /api/forum/posts/{id}/like
pub async fn like_post<R>(
    State(state): State<PortalAppState<R>>,
    Path(id): Path<String>,
) -> PortalResult<Json<MessageResponse>>
where
    R: PortalRepository,
{
    ForumUseCase::new(state.repo.clone()).like_post(&id).await?;
    Ok(Json(MessageResponse::new("Post liked successfully")))
}

// ============================================================================
// Progress
// ============================================================================

/// GET /api/progress
pub async fn list_progress<R>(
    State(state): State<PortalAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> PortalResult<Json<Vec<UserProgress>>>
where
    R: PortalRepository,
{
    let progress = ProgressUseCase::new(state.repo.clone())
        .list(&user.id)
        .await?;
    Ok(Json(progress))
}

/// POST /api/progress
pub async fn record_progress<R>(
    State(state): State<PortalAppState<R>>,
    CurrentUser(user): CurrentUser,
    ValidJson(req): ValidJson<ProgressRequest>,
) -> PortalResult<Json<UserProgress>>
where
    R: PortalRepository,
{
    let update = req.validate(user.id)?;
    let progress = ProgressUseCase::new(state.repo.clone())
        .record(update)
        .await?;
    Ok(Json(progress))
}

// ============================================================================
// Feedback & Schemes
// ============================================================================

/// POST /api/feedback
pub async fn submit_feedback<R>(
    State(state): State<PortalAppState<R>>,
    ValidJson(req): ValidJson<FeedbackRequest>,
) -> PortalResult<impl IntoResponse>
where
    R: PortalRepository,
{
    let input = req.validate()?;
    let feedback = FeedbackUseCase::new(state.repo.clone()).submit(input).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// GET /api/schemes
pub async fn list_schemes<R>(
    State(state): State<PortalAppState<R>>,
) -> PortalResult<Json<Vec<GovernmentScheme>>>
where
    R: PortalRepository,
{
    let schemes = SchemeUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(schemes))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/stats
pub async fn admin_stats<R>(
    State(state): State<PortalAppState<R>>,
    AdminUser(admin): AdminUser,
) -> PortalResult<Json<AdminStats>>
where
    R: PortalRepository,
{
    tracing::debug!(admin_id = %admin.id, "Admin stats requested");
    let stats = AdminStatsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(stats))
}

/// GET /api/admin/feedback
pub async fn admin_feedback<R>(
    State(state): State<PortalAppState<R>>,
    AdminUser(admin): AdminUser,
) -> PortalResult<Json<Vec<Feedback>>>
where
    R: PortalRepository,
{
    tracing::debug!(admin_id = %admin.id, "Admin feedback requested");
    let feedback = FeedbackUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(feedback))
}
