// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::job_repository::RepositoryError;
use crate::domain::models::job_state::JobStates;
use async_trait::async_trait;
use uuid::Uuid;

/// 投递进度仓库特质
#[async_trait]
pub trait JobStateRepository: Send + Sync {
    /// 读取投递进度，不存在时返回空记录
    async fn get(&self, user_id: Uuid) -> Result<JobStates, RepositoryError>;
    /// 插入或覆盖投递进度
    async fn save(&self, states: &JobStates) -> Result<(), RepositoryError>;
}
