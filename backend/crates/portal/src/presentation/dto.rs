//! API DTOs (Data Transfer Objects)
//!
//! Request bodies plus their validation into domain inputs. Responses are
//! the domain entities themselves.

use kernel::error::app_error::AppError;
use kernel::id::{ForumPostId, ModuleId, UserId};
use serde::Deserialize;

use crate::domain::entity::{NewFeedback, NewForumComment, NewForumPost, ProgressUpdate};

const TITLE_MAX_LENGTH: usize = 200;
const CATEGORY_MAX_LENGTH: usize = 50;
const BODY_MAX_LENGTH: usize = 10_000;
const NAME_MAX_LENGTH: usize = 100;
const EMAIL_MAX_LENGTH: usize = 254;

/// Trimmed, non-empty and at most `max` characters
fn required_text(field: &str, raw: &str, max: usize) -> Result<String, AppError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::bad_request(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(AppError::bad_request(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value.to_string())
}

// ============================================================================
// Forum
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFilter {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl CreatePostRequest {
    pub fn validate(self, user_id: UserId) -> Result<NewForumPost, AppError> {
        Ok(NewForumPost {
            user_id,
            title: required_text("Title", &self.title, TITLE_MAX_LENGTH)?,
            content: required_text("Content", &self.content, BODY_MAX_LENGTH)?,
            category: required_text("Category", &self.category, CATEGORY_MAX_LENGTH)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

impl CreateCommentRequest {
    pub fn validate(
        self,
        post_id: ForumPostId,
        user_id: UserId,
    ) -> Result<NewForumComment, AppError> {
        Ok(NewForumComment {
            post_id,
            user_id,
            content: required_text("Content", &self.content, BODY_MAX_LENGTH)?,
        })
    }
}

// ============================================================================
// Progress
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    pub module_id: String,
    #[serde(default)]
    pub completed: bool,
    /// Total seconds watched so far
    #[serde(default)]
    pub watch_time: i32,
}

impl ProgressRequest {
    pub fn validate(self, user_id: UserId) -> Result<ProgressUpdate, AppError> {
        let module_id = ModuleId::parse_str(&self.module_id)
            .map_err(|_| AppError::bad_request("Invalid module id"))?;

        if self.watch_time < 0 {
            return Err(AppError::bad_request("Watch time cannot be negative"));
        }

        Ok(ProgressUpdate {
            user_id,
            module_id,
            completed: self.completed,
            watch_time: self.watch_time,
        })
    }
}

// ============================================================================
// Feedback
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub name: String,
    pub email: String,
    pub category: String,
    /// Expected 1 to 5; not enforced
    pub rating: i32,
    pub message: String,
}

impl FeedbackRequest {
    pub fn validate(self) -> Result<NewFeedback, AppError> {
        Ok(NewFeedback {
            name: required_text("Name", &self.name, NAME_MAX_LENGTH)?,
            email: required_text("Email", &self.email, EMAIL_MAX_LENGTH)?,
            category: required_text("Category", &self.category, CATEGORY_MAX_LENGTH)?,
            rating: self.rating,
            message: required_text("Message", &self.message, BODY_MAX_LENGTH)?,
        })
    }
}
