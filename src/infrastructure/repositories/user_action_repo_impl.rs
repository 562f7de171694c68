// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::support::{from_db_time, ids_to_json, json_to_ids, to_db_time};
use crate::domain::models::user_action::UserActions;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::repositories::user_action_repository::UserActionRepository;
use crate::infrastructure::database::entities::user_action;
use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

/// 用户收藏与投递记录仓库实现
#[derive(Clone)]
pub struct UserActionRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UserActionRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<user_action::Model> for UserActions {
    type Error = RepositoryError;

    fn try_from(model: user_action::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: model.user_id,
            favorited_job_ids: json_to_ids(model.favorited_job_ids, "favorited_job_ids")?,
            applied_job_ids: json_to_ids(model.applied_job_ids, "applied_job_ids")?,
            updated_at: from_db_time(model.updated_at),
        })
    }
}

#[async_trait]
impl UserActionRepository for UserActionRepositoryImpl {
    async fn get(&self, user_id: Uuid) -> Result<UserActions, RepositoryError> {
        match user_action::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await?
        {
            Some(model) => model.try_into(),
            None => Ok(UserActions::empty(user_id)),
        }
    }

    async fn save(&self, actions: &UserActions) -> Result<(), RepositoryError> {
        let model = user_action::ActiveModel {
            user_id: Set(actions.user_id),
            favorited_job_ids: Set(ids_to_json(&actions.favorited_job_ids)),
            applied_job_ids: Set(ids_to_json(&actions.applied_job_ids)),
            updated_at: Set(to_db_time(actions.updated_at)),
        };

        user_action::Entity::insert(model)
            .on_conflict(
                OnConflict::column(user_action::Column::UserId)
                    .update_columns([
                        user_action::Column::FavoritedJobIds,
                        user_action::Column::AppliedJobIds,
                        user_action::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}
