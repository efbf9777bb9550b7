//! Feedback use cases

use std::sync::Arc;

use crate::domain::entity::{Feedback, NewFeedback};
use crate::domain::repository::FeedbackRepository;
use crate::error::PortalResult;

pub struct FeedbackUseCase<R>
where
    R: FeedbackRepository,
{
    repo: Arc<R>,
}

impl<R> FeedbackUseCase<R>
where
    R: FeedbackRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn submit(&self, feedback: NewFeedback) -> PortalResult<Feedback> {
        let feedback = self.repo.create_feedback(feedback).await?;
        tracing::info!(
            feedback_id = %feedback.id,
            category = %feedback.category,
            rating = feedback.rating,
            "Feedback received"
        );
        Ok(feedback)
    }

    pub async fn list(&self) -> PortalResult<Vec<Feedback>> {
        self.repo.list_feedback().await
    }
}
