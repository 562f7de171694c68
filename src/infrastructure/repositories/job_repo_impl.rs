// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::support::{from_db_time, ids_to_json, json_to_ids, map_write_error, to_db_time};
use crate::domain::models::job::Job;
use crate::domain::repositories::job_repository::{JobRepository, RepositoryError};
use crate::infrastructure::database::entities::job;
use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

/// 岗位仓库实现
#[derive(Clone)]
pub struct JobRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl JobRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<job::Model> for Job {
    type Error = RepositoryError;

    fn try_from(model: job::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            title: model.title,
            company: model.company,
            city: model.city,
            job_type: model.job_type.parse().map_err(RepositoryError::Corrupted)?,
            education: model.education.parse().map_err(RepositoryError::Corrupted)?,
            salary: model.salary,
            description: model.description,
            apply_url: model.apply_url,
            deadline: model.deadline,
            category_ids: json_to_ids(model.category_ids, "category_ids")?,
            tag_ids: json_to_ids(model.tag_ids, "tag_ids")?,
            is_active: model.is_active,
            view_count: model.view_count,
            created_at: from_db_time(model.created_at),
            updated_at: from_db_time(model.updated_at),
        })
    }
}

impl From<&Job> for job::ActiveModel {
    fn from(job: &Job) -> Self {
        Self {
            id: Set(job.id),
            title: Set(job.title.clone()),
            company: Set(job.company.clone()),
            city: Set(job.city.clone()),
            job_type: Set(job.job_type.to_string()),
            education: Set(job.education.to_string()),
            salary: Set(job.salary.clone()),
            description: Set(job.description.clone()),
            apply_url: Set(job.apply_url.clone()),
            deadline: Set(job.deadline),
            category_ids: Set(ids_to_json(&job.category_ids)),
            tag_ids: Set(ids_to_json(&job.tag_ids)),
            is_active: Set(job.is_active),
            view_count: Set(job.view_count),
            created_at: Set(to_db_time(job.created_at)),
            updated_at: Set(to_db_time(job.updated_at)),
        }
    }
}

#[async_trait]
impl JobRepository for JobRepositoryImpl {
    async fn create(&self, job: &Job) -> Result<Job, RepositoryError> {
        let model: job::ActiveModel = job.into();
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, "job"))?;
        Ok(job.clone())
    }

    async fn create_many(&self, jobs: &[Job]) -> Result<u64, RepositoryError> {
        if jobs.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        job::Entity::insert_many(jobs.iter().map(job::ActiveModel::from))
            .exec(&txn)
            .await
            .map_err(|e| map_write_error(e, "job"))?;
        txn.commit().await?;

        Ok(jobs.len() as u64)
    }

    async fn update(&self, job: &Job) -> Result<Job, RepositoryError> {
        let mut model: job::ActiveModel = job.into();
        // 浏览数只通过 increment_view_count 修改
        model.view_count = sea_orm::ActiveValue::NotSet;

        let updated = model
            .update(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, "job"))?;
        updated.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = job::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, RepositoryError> {
        job::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(Job::try_from)
            .transpose()
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Job>, RepositoryError> {
        let mut query = job::Entity::find();
        if active_only {
            query = query.filter(job::Column::IsActive.eq(true));
        }

        query
            .order_by_desc(job::Column::CreatedAt)
            .order_by_asc(job::Column::Id)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Job::try_from)
            .collect()
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Job, RepositoryError> {
        let model = job::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active_model: job::ActiveModel = model.into();
        active_model.is_active = Set(active);
        active_model.updated_at = Set(to_db_time(chrono::Utc::now()));

        active_model.update(self.db.as_ref()).await?.try_into()
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<i64, RepositoryError> {
        let result = job::Entity::update_many()
            .col_expr(
                job::Column::ViewCount,
                Expr::col(job::Column::ViewCount).add(1),
            )
            .filter(job::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        let model = job::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(model.view_count)
    }
}
