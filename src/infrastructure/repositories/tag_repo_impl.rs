// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::support::{from_db_time, map_write_error, to_db_time};
use crate::domain::models::tag::Tag;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::repositories::tag_repository::TagRepository;
use crate::infrastructure::database::entities::tag;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 标签仓库实现
#[derive(Clone)]
pub struct TagRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TagRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<tag::Model> for Tag {
    fn from(model: tag::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: from_db_time(model.created_at),
        }
    }
}

#[async_trait]
impl TagRepository for TagRepositoryImpl {
    async fn create(&self, tag: &Tag) -> Result<Tag, RepositoryError> {
        let model = tag::ActiveModel {
            id: Set(tag.id),
            name: Set(tag.name.clone()),
            created_at: Set(to_db_time(tag.created_at)),
        };
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, "tag name"))?;
        Ok(tag.clone())
    }

    async fn update(&self, tag: &Tag) -> Result<Tag, RepositoryError> {
        let model = tag::ActiveModel {
            id: Unchanged(tag.id),
            name: Set(tag.name.clone()),
            created_at: NotSet,
        };
        let updated = model
            .update(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, "tag name"))?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = tag::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepositoryError> {
        let model = tag::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepositoryError> {
        let model = tag::Entity::find()
            .filter(tag::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Tag>, RepositoryError> {
        let models = tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Tag::from).collect())
    }
}
