// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use uuid::Uuid;

use super::job_gate::JobGate;
use super::UseCaseError;
use crate::application::data_access::DataAccess;
use crate::application::dto::job_request::JobListQuery;
use crate::application::dto::responses::JobListResponse;
use crate::domain::models::category::Category;
use crate::domain::models::job::Job;
use crate::domain::models::tag::Tag;

/// 用户端岗位浏览
///
/// 会员额度作用在完整的上架列表上，筛选条件只决定返回哪些可见岗位，
/// 因此同一岗位在列表和详情中的锁定状态保持一致。
pub struct BrowseJobsUseCase {
    data: Arc<DataAccess>,
    gate: JobGate,
}

impl BrowseJobsUseCase {
    pub fn new(data: Arc<DataAccess>, gate: JobGate) -> Self {
        Self { data, gate }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        query: &JobListQuery,
    ) -> Result<JobListResponse, UseCaseError> {
        let visibility = self.gate.visibility(user_id).await?;

        let mut listed = Vec::new();
        let mut locked_count = 0;
        for job in visibility.jobs.iter().filter(|job| matches_query(job, query)) {
            if visibility.contains(job.id) {
                listed.push(job.clone());
            } else {
                locked_count += 1;
            }
        }

        Ok(JobListResponse {
            total: listed.len(),
            jobs: listed,
            locked_count,
            view_limit: visibility.view_limit,
            tier: visibility.tier,
        })
    }

    /// 岗位详情，超出会员额度的岗位返回 Forbidden；每次查看增加浏览数
    pub async fn detail(&self, user_id: Uuid, job_id: Uuid) -> Result<Job, UseCaseError> {
        let mut job = self.gate.ensure_visible(user_id, job_id).await?;
        job.view_count = self.data.increment_view_count(job_id).await?;
        Ok(job)
    }

    /// 筛选用的分类列表
    pub async fn categories(&self) -> Result<Vec<Category>, UseCaseError> {
        Ok(self.data.categories().await?)
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, UseCaseError> {
        Ok(self.data.tags().await?)
    }
}

/// 判断岗位是否满足列表筛选条件
pub fn matches_query(job: &Job, query: &JobListQuery) -> bool {
    if let Some(category) = query.category {
        if !job.category_ids.contains(&category) {
            return false;
        }
    }
    if let Some(tag) = query.tag {
        if !job.tag_ids.contains(&tag) {
            return false;
        }
    }
    if let Some(job_type) = query.job_type {
        if job.job_type != job_type {
            return false;
        }
    }
    if let Some(city) = query.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        if !job.city.to_lowercase().contains(&city.to_lowercase()) {
            return false;
        }
    }
    match query.keyword.as_deref() {
        Some(keyword) => job.matches_keyword(keyword),
        None => true,
    }
}

#[cfg(test)]
#[path = "browse_jobs_test.rs"]
mod tests;
