// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::settings::MembershipSettings;
use crate::domain::models::account::{MembershipTier, User};
use crate::domain::models::job::Job;
use crate::utils::errors::DomainError;

/// 会员查看额度策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipPolicy {
    pub common_view_limit: usize,
    pub temp_view_limit: usize,
    /// None 表示不限
    pub official_view_limit: Option<usize>,
}

impl Default for MembershipPolicy {
    fn default() -> Self {
        Self {
            common_view_limit: 5,
            temp_view_limit: 20,
            official_view_limit: None,
        }
    }
}

impl From<&MembershipSettings> for MembershipPolicy {
    fn from(settings: &MembershipSettings) -> Self {
        Self {
            common_view_limit: settings.common_view_limit,
            temp_view_limit: settings.temp_view_limit,
            official_view_limit: settings.official_view_limit,
        }
    }
}

impl MembershipPolicy {
    /// 每个分类下可查看的岗位数，None 表示不限
    pub fn view_limit(&self, tier: MembershipTier) -> Option<usize> {
        match tier {
            MembershipTier::Common => Some(self.common_view_limit),
            MembershipTier::Temp => Some(self.temp_view_limit),
            MembershipTier::Official => self.official_view_limit,
        }
    }
}

/// 计算用户当前实际生效的会员等级
///
/// 过期时间缺失或已过期时视为普通用户
pub fn effective_tier(user: &User, now: DateTime<Utc>) -> MembershipTier {
    match (user.tier, user.membership_expires_at) {
        (MembershipTier::Common, _) => MembershipTier::Common,
        (tier, Some(expires_at)) if expires_at > now => tier,
        _ => MembershipTier::Common,
    }
}

/// 会员剩余天数（向上取整），非会员返回 0
pub fn remaining_days(user: &User, now: DateTime<Utc>) -> i64 {
    if effective_tier(user, now) == MembershipTier::Common {
        return 0;
    }
    user.membership_expires_at
        .map(|expires_at| {
            let secs = (expires_at - now).num_seconds();
            (secs + 86_399) / 86_400
        })
        .unwrap_or(0)
}

/// 兑换激活码后的会员状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedemptionPlan {
    pub tier: MembershipTier,
    pub expires_at: DateTime<Utc>,
    /// 是否在原有有效期基础上续期
    pub extended: bool,
}

/// 计算兑换激活码后的等级与过期时间
///
/// - 激活码等级低于当前有效等级时拒绝，避免降级
/// - 同等级且仍有效时，在原过期时间上顺延
/// - 其他情况从当前时间开始计算
pub fn plan_redemption(
    current_tier: MembershipTier,
    current_expires_at: Option<DateTime<Utc>>,
    code_tier: MembershipTier,
    validity_days: i32,
    now: DateTime<Utc>,
) -> Result<RedemptionPlan, DomainError> {
    if validity_days <= 0 {
        return Err(DomainError::Validation(
            "validity_days must be greater than 0".to_string(),
        ));
    }
    if code_tier == MembershipTier::Common {
        return Err(DomainError::Validation(
            "activation code cannot grant the common tier".to_string(),
        ));
    }

    let active_expiry = current_expires_at.filter(|expires_at| *expires_at > now);
    let active_tier = match active_expiry {
        Some(_) => current_tier,
        None => MembershipTier::Common,
    };

    if code_tier < active_tier {
        return Err(DomainError::Conflict(format!(
            "current {} membership is still active, cannot redeem a {} code",
            active_tier, code_tier
        )));
    }

    let validity = Duration::days(validity_days as i64);
    let (start, extended) = match active_expiry {
        Some(expires_at) if code_tier == active_tier => (expires_at, true),
        _ => (now, false),
    };
    let expires_at = start.checked_add_signed(validity).ok_or_else(|| {
        DomainError::Validation(format!(
            "validity_days {} is out of the supported range",
            validity_days
        ))
    })?;

    Ok(RedemptionPlan {
        tier: code_tier,
        expires_at,
        extended,
    })
}

/// 按分类额度裁剪后的岗位列表
#[derive(Debug, Clone, PartialEq)]
pub struct GatedJobs {
    pub visible: Vec<Job>,
    pub locked_count: usize,
}

/// 按会员额度过滤岗位
///
/// 输入需已按展示顺序排列。只要岗位所属分类中有一个尚未达到额度即可见，
/// 可见岗位计入其所有分类；未分类岗位始终可见。
pub fn apply_view_limit(jobs: Vec<Job>, limit: Option<usize>) -> GatedJobs {
    let Some(limit) = limit else {
        return GatedJobs {
            visible: jobs,
            locked_count: 0,
        };
    };

    let mut shown: HashMap<Uuid, usize> = HashMap::new();
    let mut visible = Vec::with_capacity(jobs.len());
    let mut locked_count = 0;

    for job in jobs {
        if job.category_ids.is_empty() {
            visible.push(job);
            continue;
        }
        let has_room = job
            .category_ids
            .iter()
            .any(|c| shown.get(c).copied().unwrap_or(0) < limit);
        if has_room {
            for c in &job.category_ids {
                *shown.entry(*c).or_insert(0) += 1;
            }
            visible.push(job);
        } else {
            locked_count += 1;
        }
    }

    GatedJobs {
        visible,
        locked_count,
    }
}

#[cfg(test)]
#[path = "membership_service_test.rs"]
mod tests;
