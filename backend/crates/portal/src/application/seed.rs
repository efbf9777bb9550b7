//! Seed Use Case
//!
//! Fills an empty catalogue at startup. Tables that already hold rows are
//! left alone.

use std::sync::Arc;

use crate::application::catalogue::{default_modules, default_schemes};
use crate::domain::repository::{ModuleRepository, SchemeRepository};
use crate::error::PortalResult;

/// Rows inserted by one seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub modules: usize,
    pub schemes: usize,
}

pub struct SeedUseCase<R>
where
    R: ModuleRepository + SchemeRepository,
{
    repo: Arc<R>,
}

impl<R> SeedUseCase<R>
where
    R: ModuleRepository + SchemeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> PortalResult<SeedReport> {
        let mut report = SeedReport::default();

        if self.repo.count_modules().await? == 0 {
            for module in default_modules() {
                self.repo.create_module(module).await?;
                report.modules += 1;
            }
        }

        if self.repo.count_schemes().await? == 0 {
            for scheme in default_schemes() {
                self.repo.create_scheme(scheme).await?;
                report.schemes += 1;
            }
        }

        if report != SeedReport::default() {
            tracing::info!(
                modules = report.modules,
                schemes = report.schemes,
                "Seeded default content"
            );
        }

        Ok(report)
    }
}
