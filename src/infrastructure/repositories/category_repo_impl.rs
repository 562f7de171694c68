// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::support::{from_db_time, map_write_error, to_db_time};
use crate::domain::models::category::Category;
use crate::domain::repositories::category_repository::CategoryRepository;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::infrastructure::database::entities::category;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 分类仓库实现
#[derive(Clone)]
pub struct CategoryRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<category::Model> for Category {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: model.kind.into(),
            sort_order: model.sort_order,
            created_at: from_db_time(model.created_at),
        }
    }
}

impl From<&Category> for category::ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: Set(category.id),
            name: Set(category.name.clone()),
            kind: Set(category.kind.into()),
            sort_order: Set(category.sort_order),
            created_at: Set(to_db_time(category.created_at)),
        }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn create(&self, category: &Category) -> Result<Category, RepositoryError> {
        let model: category::ActiveModel = category.into();
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, "category name"))?;
        Ok(category.clone())
    }

    async fn update(&self, category: &Category) -> Result<Category, RepositoryError> {
        let mut model: category::ActiveModel = category.into();
        model.created_at = ActiveValue::NotSet;

        let updated = model
            .update(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, "category name"))?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = category::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepositoryError> {
        let model = category::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        let model = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Kind)
            .order_by_asc(category::Column::SortOrder)
            .order_by_asc(category::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }
}
