// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::support::{from_db_time, map_write_error, to_db_time};
use crate::domain::models::account::{MembershipTier, User};
use crate::domain::models::activation_code::{ActivationCode, CodeFilter};
use crate::domain::repositories::activation_code_repository::ActivationCodeRepository;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::infrastructure::database::entities::{activation_code, user};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

/// 激活码仓库实现
#[derive(Clone)]
pub struct ActivationCodeRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ActivationCodeRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<activation_code::Model> for ActivationCode {
    fn from(model: activation_code::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            tier: model.tier.into(),
            validity_days: model.validity_days,
            is_used: model.is_used,
            used_by: model.used_by,
            used_at: model.used_at.map(from_db_time),
            note: model.note,
            created_at: from_db_time(model.created_at),
        }
    }
}

impl From<&ActivationCode> for activation_code::ActiveModel {
    fn from(code: &ActivationCode) -> Self {
        Self {
            id: Set(code.id),
            code: Set(code.code.clone()),
            tier: Set(code.tier.into()),
            validity_days: Set(code.validity_days),
            is_used: Set(code.is_used),
            used_by: Set(code.used_by),
            used_at: Set(code.used_at.map(to_db_time)),
            note: Set(code.note.clone()),
            created_at: Set(to_db_time(code.created_at)),
        }
    }
}

#[async_trait]
impl ActivationCodeRepository for ActivationCodeRepositoryImpl {
    async fn create_batch(&self, codes: &[ActivationCode]) -> Result<u64, RepositoryError> {
        if codes.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        activation_code::Entity::insert_many(codes.iter().map(activation_code::ActiveModel::from))
            .exec(&txn)
            .await
            .map_err(|e| map_write_error(e, "activation code"))?;
        txn.commit().await?;

        Ok(codes.len() as u64)
    }

    async fn list(&self, filter: CodeFilter) -> Result<Vec<ActivationCode>, RepositoryError> {
        let mut query = activation_code::Entity::find();
        query = match filter {
            CodeFilter::All => query,
            CodeFilter::Used => query.filter(activation_code::Column::IsUsed.eq(true)),
            CodeFilter::Unused => query.filter(activation_code::Column::IsUsed.eq(false)),
        };

        let models = query
            .order_by_desc(activation_code::Column::CreatedAt)
            .order_by_asc(activation_code::Column::Code)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(ActivationCode::from).collect())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ActivationCode>, RepositoryError> {
        let model = activation_code::Entity::find()
            .filter(activation_code::Column::Code.eq(code))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn redeem(
        &self,
        code: &str,
        user_id: Uuid,
        tier: MembershipTier,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError> {
        let txn = self.db.begin().await?;

        // 条件更新：只有未使用的码会被修改，并发兑换时只有一个成功
        let result = activation_code::Entity::update_many()
            .col_expr(activation_code::Column::IsUsed, Expr::value(true))
            .col_expr(activation_code::Column::UsedBy, Expr::value(Some(user_id)))
            .col_expr(
                activation_code::Column::UsedAt,
                Expr::value::<Option<DateTime<FixedOffset>>>(Some(to_db_time(now))),
            )
            .filter(activation_code::Column::Code.eq(code))
            .filter(activation_code::Column::IsUsed.eq(false))
            .exec(&txn)
            .await?;
        if result.rows_affected != 1 {
            txn.rollback().await?;
            return Ok(None);
        }

        let Some(model) = user::Entity::find_by_id(user_id).one(&txn).await? else {
            txn.rollback().await?;
            return Err(RepositoryError::NotFound);
        };
        let mut member: user::ActiveModel = model.into();
        member.tier = Set(tier.into());
        member.membership_expires_at = Set(Some(to_db_time(expires_at)));
        member.updated_at = Set(to_db_time(now));
        let updated = member.update(&txn).await?;

        txn.commit().await?;
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let model = activation_code::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        if model.is_used {
            return Err(RepositoryError::Conflict(
                "used activation codes cannot be deleted".to_string(),
            ));
        }

        let active: activation_code::ActiveModel = model.into();
        active.delete(self.db.as_ref()).await?;
        Ok(())
    }
}
