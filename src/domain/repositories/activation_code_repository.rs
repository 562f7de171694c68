// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::job_repository::RepositoryError;
use crate::domain::models::account::{MembershipTier, User};
use crate::domain::models::activation_code::{ActivationCode, CodeFilter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 激活码仓库特质
#[async_trait]
pub trait ActivationCodeRepository: Send + Sync {
    /// 批量写入新生成的激活码
    async fn create_batch(&self, codes: &[ActivationCode]) -> Result<u64, RepositoryError>;
    /// 按创建时间倒序列出
    async fn list(&self, filter: CodeFilter) -> Result<Vec<ActivationCode>, RepositoryError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<ActivationCode>, RepositoryError>;
    /// 兑换激活码：在同一事务中条件标记激活码为已使用并写入用户会员信息
    ///
    /// 激活码已被他人抢先使用时返回 None，用户不存在时返回 NotFound，
    /// 两种情况下激活码都保持未使用
    async fn redeem(
        &self,
        code: &str,
        user_id: Uuid,
        tier: MembershipTier,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError>;
    /// 删除未使用的激活码，已使用的返回 Conflict
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
