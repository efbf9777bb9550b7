//! Progress tracking use cases

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::{ProgressUpdate, UserProgress};
use crate::domain::repository::{ModuleRepository, ProgressRepository};
use crate::error::{PortalError, PortalResult};

pub struct ProgressUseCase<R>
where
    R: ModuleRepository + ProgressRepository,
{
    repo: Arc<R>,
}

impl<R> ProgressUseCase<R>
where
    R: ModuleRepository + ProgressRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user_id: &UserId) -> PortalResult<Vec<UserProgress>> {
        self.repo.list_progress(user_id).await
    }

    /// Record the caller's progress on one module, replacing any earlier
    /// report for the same module.
    pub async fn record(&self, update: ProgressUpdate) -> PortalResult<UserProgress> {
        if self.repo.find_module(&update.module_id).await?.is_none() {
            return Err(PortalError::ModuleNotFound);
        }

        let progress = self.repo.upsert_progress(&update).await?;

        tracing::debug!(
            user_id = %progress.user_id,
            module_id = %progress.module_id,
            completed = progress.completed,
            "Progress recorded"
        );

        Ok(progress)
    }
}
