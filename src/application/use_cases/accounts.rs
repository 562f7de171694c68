// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::UseCaseError;
use crate::application::data_access::DataAccess;
use crate::application::dto::auth_request::{LoginRequestDto, RegisterRequestDto};
use crate::application::dto::responses::{AuthResponse, UserProfileDto};
use crate::domain::models::account::{Admin, Role, Session, User};
use crate::domain::repositories::account_repository::{
    AdminRepository, SessionRepository, UserRepository,
};
use crate::domain::repositories::job_repository::RepositoryError;
use crate::utils::errors::DomainError;
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "invalid username or password";

/// 账号用例
///
/// 用户与管理员分别在各自的表中校验密码，登录成功后签发会话令牌。
/// 用户注册经由数据访问门面写入，以便用户列表缓存失效并发布变更。
pub struct AccountUseCase {
    data: Arc<DataAccess>,
    users: Arc<dyn UserRepository>,
    admins: Arc<dyn AdminRepository>,
    sessions: Arc<dyn SessionRepository>,
    session_ttl: Duration,
}

impl AccountUseCase {
    pub fn new(
        data: Arc<DataAccess>,
        admins: Arc<dyn AdminRepository>,
        sessions: Arc<dyn SessionRepository>,
        session_ttl_hours: i64,
    ) -> Self {
        let users = data.repositories().users.clone();
        Self {
            data,
            users,
            admins,
            sessions,
            session_ttl: Duration::hours(session_ttl_hours.max(1)),
        }
    }

    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponse, UseCaseError> {
        dto.validate()?;

        let username = dto.username.trim().to_string();
        let display_name = dto
            .display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| username.clone());
        let password_hash = hash_password(&dto.password)?;

        let user = User::new(username, display_name, dto.email);
        let user = match self.data.create_user(user, &password_hash).await {
            Ok(user) => user,
            Err(RepositoryError::Conflict(_)) => {
                return Err(DomainError::Conflict("username is already taken".to_string()).into())
            }
            Err(e) => return Err(e.into()),
        };
        info!("Registered user {}", user.username);

        self.issue_user_session(&user).await
    }

    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponse, UseCaseError> {
        dto.validate()?;

        let credentials = self
            .users
            .find_credentials(dto.username.trim())
            .await?
            .ok_or_else(|| DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;
        if !verify_password(&dto.password, &credentials.password_hash)? {
            warn!("Failed login attempt for user {}", credentials.user.username);
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
        }
        if !credentials.user.is_active {
            return Err(DomainError::Forbidden("account is disabled".to_string()).into());
        }

        self.issue_user_session(&credentials.user).await
    }

    pub async fn admin_login(&self, dto: LoginRequestDto) -> Result<AuthResponse, UseCaseError> {
        dto.validate()?;

        let credentials = self
            .admins
            .find_credentials(dto.username.trim())
            .await?
            .ok_or_else(|| DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;
        if !verify_password(&dto.password, &credentials.password_hash)? {
            warn!("Failed admin login attempt for {}", credentials.admin.username);
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
        }

        let session = Session::issue(credentials.admin.id, Role::Admin, self.session_ttl);
        let session = self.sessions.create(&session).await?;
        info!("Admin {} logged in", credentials.admin.username);
        Ok(AuthResponse {
            token: session.token,
            role: Role::Admin,
            expires_at: session.expires_at,
            user: None,
        })
    }

    async fn issue_user_session(&self, user: &User) -> Result<AuthResponse, UseCaseError> {
        let session = Session::issue(user.id, Role::User, self.session_ttl);
        let session = self.sessions.create(&session).await?;
        Ok(AuthResponse {
            token: session.token,
            role: Role::User,
            expires_at: session.expires_at,
            user: Some(UserProfileDto::from_user(user, Utc::now())),
        })
    }

    pub async fn logout(&self, token: &str) -> Result<(), UseCaseError> {
        self.sessions.delete(token).await?;
        Ok(())
    }

    /// 根据令牌查找有效会话
    ///
    /// 用户会话还要求账号仍处于启用状态
    pub async fn authenticate(&self, token: &str) -> Result<Option<Session>, UseCaseError> {
        let Some(session) = self.sessions.find_valid(token, Utc::now()).await? else {
            return Ok(None);
        };
        if session.role == Role::User {
            match self.data.user(session.subject_id).await? {
                Some(user) if user.is_active => {}
                _ => return Ok(None),
            }
        }
        Ok(Some(session))
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfileDto, UseCaseError> {
        let user = self
            .data
            .user(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("user".to_string()))?;
        Ok(UserProfileDto::from_user(&user, Utc::now()))
    }

    pub async fn list_users(&self) -> Result<Vec<UserProfileDto>, UseCaseError> {
        let now = Utc::now();
        Ok(self
            .data
            .users()
            .await?
            .iter()
            .map(|user| UserProfileDto::from_user(user, now))
            .collect())
    }

    pub async fn set_user_active(
        &self,
        user_id: Uuid,
        active: bool,
    ) -> Result<UserProfileDto, UseCaseError> {
        let user = match self.data.set_user_active(user_id, active).await {
            Err(RepositoryError::NotFound) => {
                return Err(DomainError::NotFound("user".to_string()).into())
            }
            other => other?,
        };
        info!("User {} active = {}", user.username, active);
        Ok(UserProfileDto::from_user(&user, Utc::now()))
    }

    /// 管理员表为空时创建初始管理员，返回是否创建
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, UseCaseError> {
        if self.admins.count().await? > 0 {
            return Ok(false);
        }
        if username.trim().is_empty() || password.len() < 6 {
            return Err(UseCaseError::Validation(
                "bootstrap admin requires a username and a password of at least 6 characters"
                    .to_string(),
            ));
        }

        let admin = Admin {
            id: Uuid::new_v4(),
            username: username.trim().to_string(),
            created_at: Utc::now(),
        };
        let password_hash = hash_password(password)?;
        self.admins.create(&admin, &password_hash).await?;
        info!("Created bootstrap admin {}", admin.username);
        Ok(true)
    }
}
