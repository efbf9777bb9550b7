//! Module catalogue use cases

use std::sync::Arc;

use kernel::id::ModuleId;

use crate::domain::entity::Module;
use crate::domain::repository::ModuleRepository;
use crate::error::{PortalError, PortalResult};

pub struct ModuleUseCase<R>
where
    R: ModuleRepository,
{
    repo: Arc<R>,
}

impl<R> ModuleUseCase<R>
where
    R: ModuleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> PortalResult<Vec<Module>> {
        self.repo.list_active_modules().await
    }

    /// Unknown and malformed ids are both "not found".
    pub async fn get(&self, raw_id: &str) -> PortalResult<Module> {
        let module_id = ModuleId::parse_str(raw_id).map_err(|_| PortalError::ModuleNotFound)?;
        self.repo
            .find_module(&module_id)
            .await?
            .ok_or(PortalError::ModuleNotFound)
    }
}
