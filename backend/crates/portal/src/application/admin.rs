//! Admin dashboard use case

use std::sync::Arc;

use crate::domain::entity::AdminStats;
use crate::domain::repository::StatsRepository;
use crate::error::PortalResult;

pub struct AdminStatsUseCase<R>
where
    R: StatsRepository,
{
    repo: Arc<R>,
}

impl<R> AdminStatsUseCase<R>
where
    R: StatsRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> PortalResult<AdminStats> {
        self.repo.admin_stats().await
    }
}
