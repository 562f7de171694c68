// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::UseCaseError;
use crate::application::data_access::DataAccess;
use crate::application::dto::catalog_request::{CategoryRequestDto, TagRequestDto};
use crate::application::dto::job_request::JobRequestDto;
use crate::domain::models::category::Category;
use crate::domain::models::job::{Job, JobDraft};
use crate::domain::models::tag::Tag;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::services::category_rules::{
    validate_category_selection, validate_tag_selection,
};
use crate::utils::errors::DomainError;

/// 管理端目录维护：岗位、分类、标签
pub struct CatalogAdminUseCase {
    data: Arc<DataAccess>,
}

/// 将仓库层的未找到与唯一约束冲突转换为带资源名称的领域错误
fn named(err: RepositoryError, what: &str) -> UseCaseError {
    match err {
        RepositoryError::NotFound => DomainError::NotFound(what.to_string()).into(),
        RepositoryError::Conflict(_) => {
            DomainError::Conflict(format!("{} with the same name already exists", what)).into()
        }
        other => other.into(),
    }
}

impl CatalogAdminUseCase {
    pub fn new(data: Arc<DataAccess>) -> Self {
        Self { data }
    }

    async fn validate_draft(&self, draft: &JobDraft) -> Result<(), UseCaseError> {
        let categories = self.data.categories().await?;
        validate_category_selection(&draft.category_ids, &categories)?;
        let tags = self.data.tags().await?;
        validate_tag_selection(&draft.tag_ids, &tags)?;
        Ok(())
    }

    // ---- 岗位 ----

    pub async fn list_jobs(&self) -> Result<Vec<Job>, UseCaseError> {
        Ok(self.data.jobs(false).await?)
    }

    pub async fn get_job(&self, id: Uuid) -> Result<Job, UseCaseError> {
        self.data
            .job(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("job".to_string()).into())
    }

    pub async fn create_job(&self, dto: JobRequestDto) -> Result<Job, UseCaseError> {
        dto.validate()?;
        let draft = dto.into_draft();
        self.validate_draft(&draft).await?;

        let job = self.data.create_job(Job::from_draft(draft)).await?;
        info!("Created job {} ({})", job.title, job.id);
        Ok(job)
    }

    pub async fn update_job(&self, id: Uuid, dto: JobRequestDto) -> Result<Job, UseCaseError> {
        dto.validate()?;
        let draft = dto.into_draft();
        self.validate_draft(&draft).await?;

        let mut job = self.get_job(id).await?;
        job.apply_draft(draft);
        self.data
            .update_job(job)
            .await
            .map_err(|e| named(e, "job"))
    }

    pub async fn delete_job(&self, id: Uuid) -> Result<(), UseCaseError> {
        self.data.delete_job(id).await.map_err(|e| named(e, "job"))?;
        info!("Deleted job {}", id);
        Ok(())
    }

    pub async fn set_job_active(&self, id: Uuid, active: bool) -> Result<Job, UseCaseError> {
        self.data
            .set_job_active(id, active)
            .await
            .map_err(|e| named(e, "job"))
    }

    // ---- 分类 ----

    pub async fn list_categories(&self) -> Result<Vec<Category>, UseCaseError> {
        Ok(self.data.categories().await?)
    }

    pub async fn create_category(&self, dto: CategoryRequestDto) -> Result<Category, UseCaseError> {
        dto.validate()?;
        let category = Category::new(dto.name.trim().to_string(), dto.kind, dto.sort_order);
        self.data
            .create_category(category)
            .await
            .map_err(|e| named(e, "category"))
    }

    /// 修改分类
    ///
    /// 修改类型时，引用该分类的岗位必须仍然满足分类数量约束
    pub async fn update_category(
        &self,
        id: Uuid,
        dto: CategoryRequestDto,
    ) -> Result<Category, UseCaseError> {
        dto.validate()?;
        let mut categories = self.data.categories().await?;
        let position = categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DomainError::NotFound("category".to_string()))?;

        let kind_changed = categories[position].kind != dto.kind;
        categories[position].name = dto.name.trim().to_string();
        categories[position].kind = dto.kind;
        categories[position].sort_order = dto.sort_order;

        if kind_changed {
            for job in self.data.jobs(false).await? {
                if job.category_ids.contains(&id) {
                    validate_category_selection(&job.category_ids, &categories).map_err(|e| {
                        DomainError::Conflict(format!("job '{}' would become invalid: {}", job.title, e))
                    })?;
                }
            }
        }

        self.data
            .update_category(categories[position].clone())
            .await
            .map_err(|e| named(e, "category"))
    }

    /// 删除分类，仍被岗位引用时拒绝
    pub async fn delete_category(&self, id: Uuid) -> Result<(), UseCaseError> {
        let in_use = self
            .data
            .jobs(false)
            .await?
            .iter()
            .filter(|job| job.category_ids.contains(&id))
            .count();
        if in_use > 0 {
            return Err(DomainError::Conflict(format!(
                "category is still used by {} jobs",
                in_use
            ))
            .into());
        }
        self.data
            .delete_category(id)
            .await
            .map_err(|e| named(e, "category"))
    }

    // ---- 标签 ----

    pub async fn list_tags(&self) -> Result<Vec<Tag>, UseCaseError> {
        Ok(self.data.tags().await?)
    }

    pub async fn create_tag(&self, dto: TagRequestDto) -> Result<Tag, UseCaseError> {
        dto.validate()?;
        self.data
            .create_tag(Tag::new(dto.name.trim().to_string()))
            .await
            .map_err(|e| named(e, "tag"))
    }

    pub async fn update_tag(&self, id: Uuid, dto: TagRequestDto) -> Result<Tag, UseCaseError> {
        dto.validate()?;
        let mut tag = self
            .data
            .tags()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| DomainError::NotFound("tag".to_string()))?;
        tag.name = dto.name.trim().to_string();
        self.data.update_tag(tag).await.map_err(|e| named(e, "tag"))
    }

    pub async fn delete_tag(&self, id: Uuid) -> Result<(), UseCaseError> {
        let in_use = self
            .data
            .jobs(false)
            .await?
            .iter()
            .filter(|job| job.tag_ids.contains(&id))
            .count();
        if in_use > 0 {
            return Err(
                DomainError::Conflict(format!("tag is still used by {} jobs", in_use)).into(),
            );
        }
        self.data.delete_tag(id).await.map_err(|e| named(e, "tag"))
    }
}

#[cfg(test)]
#[path = "manage_catalog_test.rs"]
mod tests;
