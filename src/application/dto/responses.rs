// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::models::account::{MembershipTier, Role, User};
use crate::domain::models::job::Job;
use crate::domain::services::membership_service::{effective_tier, remaining_days};

/// 用户端岗位列表
#[derive(Debug, Clone, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub total: usize,
    /// 因会员额度被隐藏的岗位数
    pub locked_count: usize,
    /// 每个分类可查看的岗位数，None 表示不限
    pub view_limit: Option<usize>,
    pub tier: MembershipTier,
}

/// 用户资料，附带当前生效的会员信息
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileDto {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub tier: MembershipTier,
    pub effective_tier: MembershipTier,
    pub membership_expires_at: Option<DateTime<Utc>>,
    pub remaining_days: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserProfileDto {
    pub fn from_user(user: &User, now: DateTime<Utc>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            tier: user.tier,
            effective_tier: effective_tier(user, now),
            membership_expires_at: user.membership_expires_at,
            remaining_days: remaining_days(user, now),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfileDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RedemptionResponse {
    pub tier: MembershipTier,
    pub expires_at: DateTime<Utc>,
    pub extended: bool,
    pub profile: UserProfileDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteToggleResponse {
    pub job_id: Uuid,
    pub favorited: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyResponse {
    pub job_id: Uuid,
    pub applied: bool,
}
