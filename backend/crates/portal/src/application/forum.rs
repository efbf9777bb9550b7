//! Community forum use cases

use std::sync::Arc;

use kernel::id::ForumPostId;

use crate::domain::entity::{
    ForumComment, ForumCommentWithAuthor, ForumPost, ForumPostWithAuthor, NewForumComment,
    NewForumPost,
};
use crate::domain::repository::ForumRepository;
use crate::error::{PortalError, PortalResult};

pub struct ForumUseCase<R>
where
    R: ForumRepository,
{
    repo: Arc<R>,
}

impl<R> ForumUseCase<R>
where
    R: ForumRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// An empty category means no filter.
    pub async fn list_posts(
        &self,
        category: Option<&str>,
    ) -> PortalResult<Vec<ForumPostWithAuthor>> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        self.repo.list_posts(category).await
    }

    pub async fn create_post(&self, post: NewForumPost) -> PortalResult<ForumPost> {
        let post = self.repo.create_post(post).await?;
        tracing::info!(post_id = %post.id, user_id = %post.user_id, "Forum post created");
        Ok(post)
    }

    pub async fn like_post(&self, raw_id: &str) -> PortalResult<()> {
        let post_id = parse_post_id(raw_id)?;
        if self.repo.like_post(&post_id).await? {
            Ok(())
        } else {
            Err(PortalError::PostNotFound)
        }
    }

    /// Comments of an unknown post are simply an empty list.
    pub async fn list_comments(&self, raw_id: &str) -> PortalResult<Vec<ForumCommentWithAuthor>> {
        match ForumPostId::parse_str(raw_id) {
            Ok(post_id) => self.repo.list_comments(&post_id).await,
            Err(_) => Ok(Vec::new()),
        }
    }

    pub async fn add_comment(&self, comment: NewForumComment) -> PortalResult<ForumComment> {
        if self.repo.find_post(&comment.post_id).await?.is_none() {
            return Err(PortalError::PostNotFound);
        }

        let comment = self.repo.create_comment(comment).await?;
        tracing::info!(
            comment_id = %comment.id,
            post_id = %comment.post_id,
            "Forum comment created"
        );
        Ok(comment)
    }
}

pub fn parse_post_id(raw_id: &str) -> PortalResult<ForumPostId> {
    ForumPostId::parse_str(raw_id).map_err(|_| PortalError::PostNotFound)
}
