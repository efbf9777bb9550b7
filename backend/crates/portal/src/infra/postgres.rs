//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{
    FeedbackId, ForumCommentId, ForumPostId, ModuleId, ProgressId, SchemeId, UserId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    AdminStats, Author, Feedback, ForumComment, ForumCommentWithAuthor, ForumPost,
    ForumPostWithAuthor, GovernmentScheme, Module, NewFeedback, NewForumComment, NewForumPost,
    NewModule, NewScheme, ProgressUpdate, UserProgress, scheme::SCHEME_STATUS_ACTIVE,
};
use crate::domain::repository::{
    FeedbackRepository, ForumRepository, ModuleRepository, ProgressRepository, SchemeRepository,
    StatsRepository,
};
use crate::error::PortalResult;

/// PostgreSQL-backed repository for every portal table
#[derive(Clone)]
pub struct PgPortalRepository {
    pool: PgPool,
}

impl PgPortalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str) -> PortalResult<i64> {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

// ============================================================================
// Modules
// ============================================================================

const MODULE_COLUMNS: &str = r#"
    id,
    title,
    title_tamil,
    description,
    description_tamil,
    category,
    video_url,
    pdf_url,
    duration,
    is_active,
    created_at
"#;

impl ModuleRepository for PgPortalRepository {
    async fn list_active_modules(&self) -> PortalResult<Vec<Module>> {
        let sql = format!(
            "SELECT {MODULE_COLUMNS} FROM modules WHERE is_active = TRUE ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, ModuleRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ModuleRow::into_module).collect())
    }

    async fn find_module(&self, module_id: &ModuleId) -> PortalResult<Option<Module>> {
        let sql = format!("SELECT {MODULE_COLUMNS} FROM modules WHERE id = $1");
        let row = sqlx::query_as::<_, ModuleRow>(&sql)
            .bind(module_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ModuleRow::into_module))
    }

    async fn create_module(&self, module: NewModule) -> PortalResult<Module> {
        let module = module.into_module();

        sqlx::query(
            r#"
            INSERT INTO modules (
                id,
                title,
                title_tamil,
                description,
                description_tamil,
                category,
                video_url,
                pdf_url,
                duration,
                is_active,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(module.id.as_uuid())
        .bind(&module.title)
        .bind(&module.title_tamil)
        .bind(&module.description)
        .bind(&module.description_tamil)
        .bind(&module.category)
        .bind(&module.video_url)
        .bind(&module.pdf_url)
        .bind(module.duration)
        .bind(module.is_active)
        .bind(module.created_at)
        .execute(&self.pool)
        .await?;

        Ok(module)
    }

    async fn count_modules(&self) -> PortalResult<i64> {
        self.count("SELECT COUNT(*) FROM modules").await
    }
}

// ============================================================================
// Progress
// ============================================================================

impl ProgressRepository for PgPortalRepository {
    async fn list_progress(&self, user_id: &UserId) -> PortalResult<Vec<UserProgress>> {
        let rows = sqlx::query_as::<_, ProgressRow>(
            r#"
            SELECT id, user_id, module_id, completed, completed_at, watch_time
            FROM user_progress
            WHERE user_id = $1
            ORDER BY module_id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProgressRow::into_progress).collect())
    }

    async fn upsert_progress(&self, update: &ProgressUpdate) -> PortalResult<UserProgress> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, ProgressRow>(
            r#"
            SELECT id, user_id, module_id, completed, completed_at, watch_time
            FROM user_progress
            WHERE user_id = $1 AND module_id = $2
            FOR UPDATE
            "#,
        )
        .bind(update.user_id.as_uuid())
        .bind(update.module_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .map(ProgressRow::into_progress);

        let next = update.apply(existing.as_ref(), Utc::now());

        // A first report racing another first report lands on the unique
        // (user_id, module_id) key and overwrites instead of duplicating.
        let row = sqlx::query_as::<_, ProgressRow>(
            r#"
            INSERT INTO user_progress (id, user_id, module_id, completed, completed_at, watch_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, module_id) DO UPDATE SET
                completed = EXCLUDED.completed,
                completed_at = EXCLUDED.completed_at,
                watch_time = EXCLUDED.watch_time
            RETURNING id, user_id, module_id, completed, completed_at, watch_time
            "#,
        )
        .bind(next.id.as_uuid())
        .bind(next.user_id.as_uuid())
        .bind(next.module_id.as_uuid())
        .bind(next.completed)
        .bind(next.completed_at)
        .bind(next.watch_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_progress())
    }
}

// ============================================================================
// Forum
// ============================================================================

impl ForumRepository for PgPortalRepository {
    async fn list_posts(&self, category: Option<&str>) -> PortalResult<Vec<ForumPostWithAuthor>> {
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(
            r#"
            SELECT
                p.id,
                p.user_id,
                p.title,
                p.content,
                p.category,
                p.likes,
                p.created_at,
                u.username AS author_username,
                u.first_name AS author_first_name,
                u.last_name AS author_last_name
            FROM forum_posts p
            JOIN users u ON u.id = p.user_id
            WHERE ($1::text IS NULL OR p.category = $1)
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostWithAuthorRow::into_post).collect())
    }

    async fn find_post(&self, post_id: &ForumPostId) -> PortalResult<Option<ForumPost>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, title, content, category, likes, created_at
            FROM forum_posts
            WHERE id = $1
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn create_post(&self, post: NewForumPost) -> PortalResult<ForumPost> {
        let post = post.into_post();

        sqlx::query(
            r#"
            INSERT INTO forum_posts (id, user_id, title, content, category, likes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.user_id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.category)
        .bind(post.likes)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(post)
    }

    async fn like_post(&self, post_id: &ForumPostId) -> PortalResult<bool> {
        let updated = sqlx::query("UPDATE forum_posts SET likes = likes + 1 WHERE id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn list_comments(
        &self,
        post_id: &ForumPostId,
    ) -> PortalResult<Vec<ForumCommentWithAuthor>> {
        let rows = sqlx::query_as::<_, CommentWithAuthorRow>(
            r#"
            SELECT
                c.id,
                c.post_id,
                c.user_id,
                c.content,
                c.created_at,
                u.username AS author_username,
                u.first_name AS author_first_name,
                u.last_name AS author_last_name
            FROM forum_comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(CommentWithAuthorRow::into_comment)
            .collect())
    }

    async fn create_comment(&self, comment: NewForumComment) -> PortalResult<ForumComment> {
        let comment = comment.into_comment();

        sqlx::query(
            r#"
            INSERT INTO forum_comments (id, post_id, user_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(comment.user_id.as_uuid())
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(comment)
    }
}

// ============================================================================
// Feedback
// ============================================================================

impl FeedbackRepository for PgPortalRepository {
    async fn create_feedback(&self, feedback: NewFeedback) -> PortalResult<Feedback> {
        let feedback = feedback.into_feedback();

        sqlx::query(
            r#"
            INSERT INTO feedback (
                id,
                name,
                email,
                category,
                rating,
                message,
                is_reviewed,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(feedback.id.as_uuid())
        .bind(&feedback.name)
        .bind(&feedback.email)
        .bind(&feedback.category)
        .bind(feedback.rating)
        .bind(&feedback.message)
        .bind(feedback.is_reviewed)
        .bind(feedback.created_at)
        .execute(&self.pool)
        .await?;

        Ok(feedback)
    }

    async fn list_feedback(&self) -> PortalResult<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            r#"
            SELECT id, name, email, category, rating, message, is_reviewed, created_at
            FROM feedback
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FeedbackRow::into_feedback).collect())
    }
}

// ============================================================================
// Schemes
// ============================================================================

impl SchemeRepository for PgPortalRepository {
    async fn list_active_schemes(&self) -> PortalResult<Vec<GovernmentScheme>> {
        let rows = sqlx::query_as::<_, SchemeRow>(
            r#"
            SELECT
                id,
                name,
                name_tamil,
                description,
                description_tamil,
                category,
                eligibility,
                amount,
                status,
                application_url,
                last_updated
            FROM government_schemes
            WHERE status = $1
            ORDER BY last_updated DESC
            "#,
        )
        .bind(SCHEME_STATUS_ACTIVE)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SchemeRow::into_scheme).collect())
    }

    async fn create_scheme(&self, scheme: NewScheme) -> PortalResult<GovernmentScheme> {
        let scheme = scheme.into_scheme();

        sqlx::query(
            r#"
            INSERT INTO government_schemes (
                id,
                name,
                name_tamil,
                description,
                description_tamil,
                category,
                eligibility,
                amount,
                status,
                application_url,
                last_updated
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(scheme.id.as_uuid())
        .bind(&scheme.name)
        .bind(&scheme.name_tamil)
        .bind(&scheme.description)
        .bind(&scheme.description_tamil)
        .bind(&scheme.category)
        .bind(&scheme.eligibility)
        .bind(&scheme.amount)
        .bind(&scheme.status)
        .bind(&scheme.application_url)
        .bind(scheme.last_updated)
        .execute(&self.pool)
        .await?;

        Ok(scheme)
    }

    async fn count_schemes(&self) -> PortalResult<i64> {
        self.count("SELECT COUNT(*) FROM government_schemes").await
    }
}

// ============================================================================
// Admin Stats
// ============================================================================

impl StatsRepository for PgPortalRepository {
    async fn admin_stats(&self) -> PortalResult<AdminStats> {
        Ok(AdminStats {
            total_users: self.count("SELECT COUNT(*) FROM users").await?,
            total_modules: self.count("SELECT COUNT(*) FROM modules").await?,
            total_posts: self.count("SELECT COUNT(*) FROM forum_posts").await?,
            total_feedback: self.count("SELECT COUNT(*) FROM feedback").await?,
            completed_modules: self
                .count("SELECT COUNT(*) FROM user_progress WHERE completed = TRUE")
                .await?,
        })
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ModuleRow {
    id: Uuid,
    title: String,
    title_tamil: Option<String>,
    description: String,
    description_tamil: Option<String>,
    category: String,
    video_url: Option<String>,
    pdf_url: Option<String>,
    duration: Option<i32>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl ModuleRow {
    fn into_module(self) -> Module {
        Module {
            id: ModuleId::from_uuid(self.id),
            title: self.title,
            title_tamil: self.title_tamil,
            description: self.description,
            description_tamil: self.description_tamil,
            category: self.category,
            video_url: self.video_url,
            pdf_url: self.pdf_url,
            duration: self.duration,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProgressRow {
    id: Uuid,
    user_id: Uuid,
    module_id: Uuid,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
    watch_time: i32,
}

impl ProgressRow {
    fn into_progress(self) -> UserProgress {
        UserProgress {
            id: ProgressId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            module_id: ModuleId::from_uuid(self.module_id),
            completed: self.completed,
            completed_at: self.completed_at,
            watch_time: self.watch_time,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    content: String,
    category: String,
    likes: i32,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> ForumPost {
        ForumPost {
            id: ForumPostId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            title: self.title,
            content: self.content,
            category: self.category,
            likes: self.likes,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostWithAuthorRow {
    #[sqlx(flatten)]
    post: PostRow,
    author_username: String,
    author_first_name: String,
    author_last_name: String,
}

impl PostWithAuthorRow {
    fn into_post(self) -> ForumPostWithAuthor {
        let post = self.post.into_post();
        ForumPostWithAuthor {
            author: Author {
                id: post.user_id,
                username: self.author_username,
                first_name: self.author_first_name,
                last_name: self.author_last_name,
            },
            post,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentWithAuthorRow {
    id: Uuid,
    post_id: Uuid,
    user_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    author_username: String,
    author_first_name: String,
    author_last_name: String,
}

impl CommentWithAuthorRow {
    fn into_comment(self) -> ForumCommentWithAuthor {
        let user_id = UserId::from_uuid(self.user_id);
        ForumCommentWithAuthor {
            comment: ForumComment {
                id: ForumCommentId::from_uuid(self.id),
                post_id: ForumPostId::from_uuid(self.post_id),
                user_id,
                content: self.content,
                created_at: self.created_at,
            },
            author: Author {
                id: user_id,
                username: self.author_username,
                first_name: self.author_first_name,
                last_name: self.author_last_name,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct FeedbackRow {
    id: Uuid,
    name: String,
    email: String,
    category: String,
    rating: i32,
    message: String,
    is_reviewed: bool,
    created_at: DateTime<Utc>,
}

impl FeedbackRow {
    fn into_feedback(self) -> Feedback {
        Feedback {
            id: FeedbackId::from_uuid(self.id),
            name: self.name,
            email: self.email,
            category: self.category,
            rating: self.rating,
            message: self.message,
            is_reviewed: self.is_reviewed,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SchemeRow {
    id: Uuid,
    name: String,
    name_tamil: Option<String>,
    description: String,
    description_tamil: Option<String>,
    category: String,
    eligibility: String,
    amount: Option<String>,
    status: String,
    application_url: Option<String>,
    last_updated: DateTime<Utc>,
}

impl SchemeRow {
    fn into_scheme(self) -> GovernmentScheme {
        GovernmentScheme {
            id: SchemeId::from_uuid(self.id),
            name: self.name,
            name_tamil: self.name_tamil,
            description: self.description,
            description_tamil: self.description_tamil,
            category: self.category,
            eligibility: self.eligibility,
            amount: self.amount,
            status: self.status,
            application_url: self.application_url,
            last_updated: self.last_updated,
        }
    }
}
