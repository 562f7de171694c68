// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use super::job_gate::JobGate;
use super::UseCaseError;
use crate::application::data_access::DataAccess;
use crate::application::dto::job_state_request::JobStateRequestDto;
use crate::application::dto::responses::{ApplyResponse, FavoriteToggleResponse};
use crate::domain::models::job::Job;
use crate::domain::models::job_state::{ApplicationStage, JobStates};
use crate::utils::errors::DomainError;

/// 收藏、投递与投递进度
///
/// 收藏和投递只对当前会员额度内可见的岗位开放，列表中也只返回可见岗位。
pub struct UserActivityUseCase {
    data: Arc<DataAccess>,
    gate: JobGate,
}

impl UserActivityUseCase {
    pub fn new(data: Arc<DataAccess>, gate: JobGate) -> Self {
        Self { data, gate }
    }

    /// 切换收藏；取消收藏不受额度限制
    pub async fn toggle_favorite(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<FavoriteToggleResponse, UseCaseError> {
        let already = self
            .data
            .user_actions(user_id)
            .await?
            .favorited_job_ids
            .contains(&job_id);
        let favorited = if already {
            self.data
                .update_user_actions(user_id, |actions| actions.remove_favorite(job_id))
                .await?;
            false
        } else {
            self.gate.ensure_visible(user_id, job_id).await?;
            self.data
                .update_user_actions(user_id, |actions| actions.add_favorite(job_id))
                .await?;
            true
        };
        debug!("User {} favorite {} = {}", user_id, job_id, favorited);
        Ok(FavoriteToggleResponse { job_id, favorited })
    }

    /// 记录投递，首次投递时投递进度进入 Applied 阶段
    pub async fn apply(&self, user_id: Uuid, job_id: Uuid) -> Result<ApplyResponse, UseCaseError> {
        self.gate.ensure_visible(user_id, job_id).await?;
        let (_, added) = self
            .data
            .update_user_actions(user_id, |actions| actions.add_applied(job_id))
            .await?;
        if added {
            self.data
                .update_job_states(user_id, |states| {
                    if states.stage_of(job_id).is_none() {
                        states.upsert(job_id, ApplicationStage::Applied, None);
                    }
                })
                .await?;
        }
        Ok(ApplyResponse {
            job_id,
            applied: true,
        })
    }

    /// 撤回投递，未投递时保持幂等
    pub async fn withdraw(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<ApplyResponse, UseCaseError> {
        self.data
            .update_user_actions(user_id, |actions| actions.remove_applied(job_id))
            .await?;
        Ok(ApplyResponse {
            job_id,
            applied: false,
        })
    }

    /// 收藏的岗位，按收藏顺序返回，已删除、下架或超出额度的岗位被跳过
    pub async fn favorites(&self, user_id: Uuid) -> Result<Vec<Job>, UseCaseError> {
        let actions = self.data.user_actions(user_id).await?;
        self.resolve_jobs(user_id, &actions.favorited_job_ids).await
    }

    pub async fn applied(&self, user_id: Uuid) -> Result<Vec<Job>, UseCaseError> {
        let actions = self.data.user_actions(user_id).await?;
        self.resolve_jobs(user_id, &actions.applied_job_ids).await
    }

    async fn resolve_jobs(&self, user_id: Uuid, ids: &[Uuid]) -> Result<Vec<Job>, UseCaseError> {
        let visibility = self.gate.visibility(user_id).await?;
        let mut by_id: HashMap<Uuid, Job> = visibility
            .jobs
            .into_iter()
            .filter(|job| visibility.visible.contains(&job.id))
            .map(|job| (job.id, job))
            .collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    pub async fn job_states(&self, user_id: Uuid) -> Result<JobStates, UseCaseError> {
        Ok(self.data.job_states(user_id).await?)
    }

    pub async fn set_job_state(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        dto: JobStateRequestDto,
    ) -> Result<JobStates, UseCaseError> {
        dto.validate()?;
        if self.data.job(job_id).await?.is_none() {
            return Err(DomainError::NotFound("job".to_string()).into());
        }

        let note = dto
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let (states, _) = self
            .data
            .update_job_states(user_id, |states| states.upsert(job_id, dto.stage, note))
            .await?;
        Ok(states)
    }

    pub async fn remove_job_state(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<JobStates, UseCaseError> {
        let (states, removed) = self
            .data
            .update_job_states(user_id, |states| states.remove(job_id))
            .await?;
        if !removed {
            return Err(DomainError::NotFound("job state".to_string()).into());
        }
        Ok(states)
    }
}
