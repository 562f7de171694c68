// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::UseCaseError;
use crate::application::data_access::DataAccess;
use crate::application::dto::activation_request::RedeemRequestDto;
use crate::application::dto::responses::{RedemptionResponse, UserProfileDto};
use crate::domain::models::account::MembershipTier;
use crate::domain::models::activation_code::normalize_code;
use crate::domain::services::membership_service::plan_redemption;
use crate::utils::errors::DomainError;

const ALREADY_USED: &str = "activation code has already been used";

/// 激活码兑换
///
/// 查找激活码并计算兑换后的会员状态，再在同一事务中条件更新激活码为已使用
/// 并写入用户会员信息。条件更新失败说明激活码被并发兑换。
pub struct RedeemCodeUseCase {
    data: Arc<DataAccess>,
}

impl RedeemCodeUseCase {
    pub fn new(data: Arc<DataAccess>) -> Self {
        Self { data }
    }

    pub async fn redeem(
        &self,
        user_id: Uuid,
        dto: RedeemRequestDto,
    ) -> Result<RedemptionResponse, UseCaseError> {
        dto.validate()?;
        let now = Utc::now();
        let code_value = normalize_code(&dto.code);

        let code = self
            .data
            .find_activation_code(&code_value)
            .await?
            .ok_or_else(|| DomainError::NotFound("activation code".to_string()))?;
        if code.is_used {
            return Err(DomainError::Conflict(ALREADY_USED.to_string()).into());
        }

        let user = self
            .data
            .user(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("user".to_string()))?;
        let plan = plan_redemption(
            user.tier,
            user.membership_expires_at,
            code.tier,
            code.validity_days,
            now,
        )?;

        let Some(user) = self
            .data
            .redeem_activation_code(&code, user_id, plan.tier, plan.expires_at, now)
            .await?
        else {
            warn!("Activation code {} was redeemed concurrently", code.code);
            return Err(DomainError::Conflict(ALREADY_USED.to_string()).into());
        };

        counter!("activation_codes_redeemed_total", "tier" => tier_label(plan.tier)).increment(1);
        info!(
            "User {} redeemed {} code, membership until {}",
            user.username, plan.tier, plan.expires_at
        );

        Ok(RedemptionResponse {
            tier: plan.tier,
            expires_at: plan.expires_at,
            extended: plan.extended,
            profile: UserProfileDto::from_user(&user, now),
        })
    }
}

fn tier_label(tier: MembershipTier) -> &'static str {
    match tier {
        MembershipTier::Common => "common",
        MembershipTier::Temp => "temp",
        MembershipTier::Official => "official",
    }
}
