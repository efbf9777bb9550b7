//! Government scheme directory

use std::sync::Arc;

use crate::domain::entity::GovernmentScheme;
use crate::domain::repository::SchemeRepository;
use crate::error::PortalResult;

pub struct SchemeUseCase<R>
where
    R: SchemeRepository,
{
    repo: Arc<R>,
}

impl<R> SchemeUseCase<R>
where
    R: SchemeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> PortalResult<Vec<GovernmentScheme>> {
        self.repo.list_active_schemes().await
    }
}
