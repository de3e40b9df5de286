//! Company read and rename.

use std::sync::Arc;

use tracing::info;

use glyms_core::error::AppError;
use glyms_database::repositories::CompanyRepository;
use glyms_entity::company::Company;

use crate::context::RequestContext;

/// Company use cases.
#[derive(Debug, Clone)]
pub struct CompanyService {
    company_repo: Arc<CompanyRepository>,
}

impl CompanyService {
    /// Creates a new company service.
    pub fn new(company_repo: Arc<CompanyRepository>) -> Self {
        Self { company_repo }
    }

    /// The caller's company.
    pub async fn get(&self, ctx: &RequestContext) -> Result<Company, AppError> {
        self.company_repo
            .find_by_id(ctx.company_id)
            .await?
            .ok_or_else(|| AppError::not_found("Company not found"))
    }

    /// Rename the caller's company (admin).
    pub async fn rename(&self, ctx: &RequestContext, name: &str) -> Result<Company, AppError> {
        ctx.require_admin()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Company name is required"));
        }
        let company = self.company_repo.rename(ctx.company_id, name).await?;
        info!(company_id = %company.id, "Company renamed");
        Ok(company)
    }
}
