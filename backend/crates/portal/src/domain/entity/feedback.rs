//! Feedback Entity

use chrono::{DateTime, Utc};
use kernel::id::FeedbackId;
use serde::Serialize;

/// Free-form feedback; not tied to an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: FeedbackId,
    pub name: String,
    pub email: String,
    pub category: String,
    pub rating: i32,
    pub message: String,
    pub is_reviewed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub category: String,
    pub rating: i32,
    pub message: String,
}

impl NewFeedback {
    pub fn into_feedback(self) -> Feedback {
        Feedback {
            id: FeedbackId::new(),
            name: self.name,
            email: self.email,
            category: self.category,
            rating: self.rating,
            message: self.message,
            is_reviewed: false,
            created_at: Utc::now(),
        }
    }
}
