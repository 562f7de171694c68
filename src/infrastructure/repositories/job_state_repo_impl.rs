// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::support::{from_db_time, to_db_time};
use crate::domain::models::job_state::JobStates;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::repositories::job_state_repository::JobStateRepository;
use crate::infrastructure::database::entities::job_state;
use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

/// 用户岗位进度仓库实现
#[derive(Clone)]
pub struct JobStateRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl JobStateRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl JobStateRepository for JobStateRepositoryImpl {
    async fn get(&self, user_id: Uuid) -> Result<JobStates, RepositoryError> {
        let Some(model) = job_state::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(JobStates::empty(user_id));
        };

        let entries = serde_json::from_value(model.entries)
            .map_err(|e| RepositoryError::Corrupted(format!("entries: {}", e)))?;
        Ok(JobStates {
            user_id: model.user_id,
            entries,
            updated_at: from_db_time(model.updated_at),
        })
    }

    async fn save(&self, states: &JobStates) -> Result<(), RepositoryError> {
        let entries = serde_json::to_value(&states.entries)
            .map_err(|e| RepositoryError::Corrupted(format!("entries: {}", e)))?;
        let model = job_state::ActiveModel {
            user_id: Set(states.user_id),
            entries: Set(entries),
            updated_at: Set(to_db_time(states.updated_at)),
        };

        job_state::Entity::insert(model)
            .on_conflict(
                OnConflict::column(job_state::Column::UserId)
                    .update_columns([job_state::Column::Entries, job_state::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}
