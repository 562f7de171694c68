// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::Job;
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 唯一约束或状态冲突
    #[error("Conflict: {0}")]
    Conflict(String),
    /// 存储内容无法解析
    #[error("Corrupted data: {0}")]
    Corrupted(String),
}

/// 岗位仓库特质
///
/// 定义岗位数据访问接口
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// 创建岗位
    async fn create(&self, job: &Job) -> Result<Job, RepositoryError>;
    /// 批量创建岗位（CSV 导入）
    async fn create_many(&self, jobs: &[Job]) -> Result<u64, RepositoryError>;
    /// 更新岗位
    async fn update(&self, job: &Job) -> Result<Job, RepositoryError>;
    /// 删除岗位
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 根据ID查找岗位
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, RepositoryError>;
    /// 按创建时间倒序列出岗位
    async fn list(&self, active_only: bool) -> Result<Vec<Job>, RepositoryError>;
    /// 上架或下架岗位
    async fn set_active(&self, id: Uuid, active: bool) -> Result<Job, RepositoryError>;
    /// 原子地增加浏览次数，返回增加后的值
    async fn increment_view_count(&self, id: Uuid) -> Result<i64, RepositoryError>;
}
