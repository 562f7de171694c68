// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::job_repository::RepositoryError;
use crate::domain::models::account::{
    Admin, AdminCredentials, MembershipTier, Session, User, UserCredentials,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 用户仓库特质
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 创建用户，用户名重复时返回 Conflict
    async fn create(&self, user: &User, password_hash: &str) -> Result<User, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    /// 按用户名查找登录信息
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, RepositoryError>;
    /// 按注册时间倒序列出用户
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;
    /// 启用或停用用户
    async fn set_active(&self, id: Uuid, active: bool) -> Result<User, RepositoryError>;
    /// 更新会员等级与过期时间
    async fn update_membership(
        &self,
        id: Uuid,
        tier: MembershipTier,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<User, RepositoryError>;
    /// 将已过期的会员降级为普通用户，返回受影响的用户ID
    async fn downgrade_expired(&self, now: DateTime<Utc>) -> Result<Vec<Uuid>, RepositoryError>;
}

/// 管理员仓库特质
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, admin: &Admin, password_hash: &str) -> Result<Admin, RepositoryError>;
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<AdminCredentials>, RepositoryError>;
    async fn count(&self) -> Result<u64, RepositoryError>;
}

/// 会话仓库特质
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<Session, RepositoryError>;
    /// 查找未过期的会话
    async fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, RepositoryError>;
    async fn delete(&self, token: &str) -> Result<(), RepositoryError>;
    /// 清理过期会话，返回删除数量
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
