// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::job_repository::RepositoryError;
use crate::domain::models::category::Category;
use async_trait::async_trait;
use uuid::Uuid;

/// 分类仓库特质
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// 创建分类，名称重复时返回 Conflict
    async fn create(&self, category: &Category) -> Result<Category, RepositoryError>;
    async fn update(&self, category: &Category) -> Result<Category, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepositoryError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError>;
    /// 按类型、排序值、名称排序
    async fn list(&self) -> Result<Vec<Category>, RepositoryError>;
}
