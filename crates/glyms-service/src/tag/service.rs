//! Tag listing and creation.

use std::sync::Arc;

use tracing::info;

use glyms_core::error::AppError;
use glyms_database::repositories::TagRepository;
use glyms_entity::tag::Tag;

use crate::context::RequestContext;

/// Longest accepted tag name.
const MAX_TAG_LENGTH: usize = 64;

/// Tag catalog use cases.
#[derive(Debug, Clone)]
pub struct TagService {
    tag_repo: Arc<TagRepository>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tag_repo: Arc<TagRepository>) -> Self {
        Self { tag_repo }
    }

    /// The whole catalog.
    pub async fn list(&self) -> Result<Vec<Tag>, AppError> {
        self.tag_repo.list().await
    }

    /// Add a tag (admin).
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> Result<Tag, AppError> {
        ctx.require_admin()?;
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_TAG_LENGTH {
            return Err(AppError::validation(format!(
                "Tag name must be 1 to {MAX_TAG_LENGTH} characters"
            )));
        }
        let tag = self.tag_repo.create(name).await?;
        info!(tag_id = %tag.id, name = %tag.name, "Tag created");
        Ok(tag)
    }
}
