// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use super::UseCaseError;
use crate::application::data_access::DataAccess;
use crate::domain::models::account::{MembershipTier, User};
use crate::domain::models::job::Job;
use crate::domain::services::membership_service::{
    apply_view_limit, effective_tier, MembershipPolicy,
};
use crate::utils::errors::DomainError;

/// 会员额度门禁
///
/// 额度作用在完整的上架列表上，列表、详情、收藏和投递共用同一份可见集合。
#[derive(Clone)]
pub struct JobGate {
    data: Arc<DataAccess>,
    policy: MembershipPolicy,
}

/// 某个用户在当前时刻的可见范围
pub struct Visibility {
    pub tier: MembershipTier,
    pub view_limit: Option<usize>,
    pub jobs: Vec<Job>,
    pub visible: HashSet<Uuid>,
}

impl Visibility {
    pub fn contains(&self, job_id: Uuid) -> bool {
        self.visible.contains(&job_id)
    }
}

impl JobGate {
    pub fn new(data: Arc<DataAccess>, policy: MembershipPolicy) -> Self {
        Self { data, policy }
    }

    pub async fn load_user(&self, user_id: Uuid) -> Result<User, UseCaseError> {
        self.data
            .user(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("user".to_string()).into())
    }

    pub async fn visibility(&self, user_id: Uuid) -> Result<Visibility, UseCaseError> {
        let user = self.load_user(user_id).await?;
        let tier = effective_tier(&user, Utc::now());
        let view_limit = self.policy.view_limit(tier);
        let jobs = self.data.jobs(true).await?;
        let visible = apply_view_limit(jobs.clone(), view_limit)
            .visible
            .into_iter()
            .map(|job| job.id)
            .collect();

        Ok(Visibility {
            tier,
            view_limit,
            jobs,
            visible,
        })
    }

    /// 返回用户可以访问的上架岗位
    ///
    /// 不存在或已下架返回 NotFound，超出会员额度返回 Forbidden
    pub async fn ensure_visible(&self, user_id: Uuid, job_id: Uuid) -> Result<Job, UseCaseError> {
        let job = match self.data.job(job_id).await? {
            Some(job) if job.is_active => job,
            _ => return Err(DomainError::NotFound("job".to_string()).into()),
        };

        let visibility = self.visibility(user_id).await?;
        if !visibility.contains(job_id) {
            return Err(DomainError::Forbidden(format!(
                "job is locked for {} members, redeem an activation code to view more",
                visibility.tier
            ))
            .into());
        }
        Ok(job)
    }
}
