// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::job_repository::RepositoryError;
use crate::domain::models::user_action::UserActions;
use async_trait::async_trait;
use uuid::Uuid;

/// 用户行为仓库特质
#[async_trait]
pub trait UserActionRepository: Send + Sync {
    /// 读取用户行为，不存在时返回空记录
    async fn get(&self, user_id: Uuid) -> Result<UserActions, RepositoryError>;
    /// 插入或覆盖用户行为
    async fn save(&self, actions: &UserActions) -> Result<(), RepositoryError>;
}
