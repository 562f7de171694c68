// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::job_repository::RepositoryError;
use crate::domain::models::tag::Tag;
use async_trait::async_trait;
use uuid::Uuid;

/// 标签仓库特质
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn create(&self, tag: &Tag) -> Result<Tag, RepositoryError>;
    async fn update(&self, tag: &Tag) -> Result<Tag, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepositoryError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepositoryError>;
    async fn list(&self) -> Result<Vec<Tag>, RepositoryError>;
}
