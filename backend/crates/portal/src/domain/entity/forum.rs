//! Forum Entities
//!
//! Posts and comments are returned joined with a public projection of their
//! author; the stored credential is never part of it.

use chrono::{DateTime, Utc};
use kernel::id::{ForumCommentId, ForumPostId, UserId};
use serde::Serialize;

/// Public projection of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: ForumPostId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub category: String,
    /// Only ever incremented
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForumPostWithAuthor {
    #[serde(flatten)]
    pub post: ForumPost,
    pub author: Author,
}

#[derive(Debug, Clone)]
pub struct NewForumPost {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub category: String,
}

impl NewForumPost {
    pub fn into_post(self) -> ForumPost {
        ForumPost {
            id: ForumPostId::new(),
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            category: self.category,
            likes: 0,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumComment {
    pub id: ForumCommentId,
    pub post_id: ForumPostId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForumCommentWithAuthor {
    #[serde(flatten)]
    pub comment: ForumComment,
    pub author: Author,
}

#[derive(Debug, Clone)]
pub struct NewForumComment {
    pub post_id: ForumPostId,
    pub user_id: UserId,
    pub content: String,
}

impl NewForumComment {
    pub fn into_comment(self) -> ForumComment {
        ForumComment {
            id: ForumCommentId::new(),
            post_id: self.post_id,
            user_id: self.user_id,
            content: self.content,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_with_author_is_flat() {
        let user_id = UserId::new();
        let post = NewForumPost {
            user_id,
            title: "UPI help".into(),
            content: "How do I set a PIN?".into(),
            category: "banking".into(),
        }
        .into_post();

        let json = serde_json::to_value(ForumPostWithAuthor {
            post,
            author: Author {
                id: user_id,
                username: "alice".into(),
                first_name: "Alice".into(),
                last_name: "Kumar".into(),
            },
        })
        .unwrap();

        assert_eq!(json["title"], "UPI help");
        assert_eq!(json["likes"], 0);
        assert_eq!(json["userId"], user_id.to_string());
        assert_eq!(json["author"]["username"], "alice");
        assert_eq!(json["author"]["firstName"], "Alice");
        assert!(json["author"].get("password").is_none());
    }
}
