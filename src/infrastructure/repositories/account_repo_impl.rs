// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::support::{from_db_time, map_write_error, to_db_time};
use crate::domain::models::account::{
    Admin, AdminCredentials, MembershipTier, Session, User, UserCredentials,
};
use crate::domain::repositories::account_repository::{
    AdminRepository, SessionRepository, UserRepository,
};
use crate::domain::repositories::job_repository::RepositoryError;
use crate::infrastructure::database::entities::sea_orm_active_enums::SeaMembershipTier;
use crate::infrastructure::database::entities::{admin, session, user};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 用户仓库实现
#[derive(Clone)]
pub struct UserRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> Result<user::Model, RepositoryError> {
        user::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            display_name: model.display_name,
            email: model.email,
            tier: model.tier.into(),
            membership_expires_at: model.membership_expires_at.map(from_db_time),
            is_active: model.is_active,
            created_at: from_db_time(model.created_at),
            updated_at: from_db_time(model.updated_at),
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, user: &User, password_hash: &str) -> Result<User, RepositoryError> {
        let model = user::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            password_hash: Set(password_hash.to_string()),
            display_name: Set(user.display_name.clone()),
            email: Set(user.email.clone()),
            tier: Set(user.tier.into()),
            membership_expires_at: Set(user.membership_expires_at.map(to_db_time)),
            is_active: Set(user.is_active),
            created_at: Set(to_db_time(user.created_at)),
            updated_at: Set(to_db_time(user.updated_at)),
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, "username"))?;
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(|m| {
            let password_hash = m.password_hash.clone();
            UserCredentials {
                user: m.into(),
                password_hash,
            }
        }))
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let models = user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<User, RepositoryError> {
        let mut model: user::ActiveModel = self.find_model(id).await?.into();
        model.is_active = Set(active);
        model.updated_at = Set(to_db_time(Utc::now()));
        Ok(model.update(self.db.as_ref()).await?.into())
    }

    async fn update_membership(
        &self,
        id: Uuid,
        tier: MembershipTier,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<User, RepositoryError> {
        let mut model: user::ActiveModel = self.find_model(id).await?.into();
        model.tier = Set(tier.into());
        model.membership_expires_at = Set(expires_at.map(to_db_time));
        model.updated_at = Set(to_db_time(Utc::now()));
        Ok(model.update(self.db.as_ref()).await?.into())
    }

    async fn downgrade_expired(&self, now: DateTime<Utc>) -> Result<Vec<Uuid>, RepositoryError> {
        let expired: Vec<Uuid> = user::Entity::find()
            .select_only()
            .column(user::Column::Id)
            .filter(user::Column::Tier.ne(SeaMembershipTier::Common))
            .filter(user::Column::MembershipExpiresAt.lte(to_db_time(now)))
            .into_tuple()
            .all(self.db.as_ref())
            .await?;

        if expired.is_empty() {
            return Ok(expired);
        }

        user::Entity::update_many()
            .col_expr(user::Column::Tier, Expr::value(SeaMembershipTier::Common))
            .col_expr(
                user::Column::MembershipExpiresAt,
                Expr::value(Option::<DateTime<FixedOffset>>::None),
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(to_db_time(now)))
            .filter(user::Column::Id.is_in(expired.clone()))
            .exec(self.db.as_ref())
            .await?;

        Ok(expired)
    }
}

/// 管理员仓库实现
#[derive(Clone)]
pub struct AdminRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AdminRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<admin::Model> for Admin {
    fn from(model: admin::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: from_db_time(model.created_at),
        }
    }
}

#[async_trait]
impl AdminRepository for AdminRepositoryImpl {
    async fn create(&self, admin: &Admin, password_hash: &str) -> Result<Admin, RepositoryError> {
        let model = admin::ActiveModel {
            id: Set(admin.id),
            username: Set(admin.username.clone()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(to_db_time(admin.created_at)),
        };
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, "admin username"))?;
        Ok(admin.clone())
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<AdminCredentials>, RepositoryError> {
        let model = admin::Entity::find()
            .filter(admin::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(|m| {
            let password_hash = m.password_hash.clone();
            AdminCredentials {
                admin: m.into(),
                password_hash,
            }
        }))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(admin::Entity::find().count(self.db.as_ref()).await?)
    }
}

/// 会话仓库实现
#[derive(Clone)]
pub struct SessionRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SessionRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<session::Model> for Session {
    fn from(model: session::Model) -> Self {
        Self {
            token: model.token,
            subject_id: model.subject_id,
            role: model.role.into(),
            expires_at: from_db_time(model.expires_at),
            created_at: from_db_time(model.created_at),
        }
    }
}

#[async_trait]
impl SessionRepository for SessionRepositoryImpl {
    async fn create(&self, session: &Session) -> Result<Session, RepositoryError> {
        let model = session::ActiveModel {
            token: Set(session.token.clone()),
            subject_id: Set(session.subject_id),
            role: Set(session.role.into()),
            expires_at: Set(to_db_time(session.expires_at)),
            created_at: Set(to_db_time(session.created_at)),
        };
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_write_error(e, "session"))?;
        Ok(session.clone())
    }

    async fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, RepositoryError> {
        let model = session::Entity::find_by_id(token.to_string())
            .filter(session::Column::ExpiresAt.gt(to_db_time(now)))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn delete(&self, token: &str) -> Result<(), RepositoryError> {
        session::Entity::delete_by_id(token.to_string())
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = session::Entity::delete_many()
            .filter(session::Column::ExpiresAt.lte(to_db_time(now)))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }
}
