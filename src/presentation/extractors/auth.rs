// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::domain::models::account::Role;
use crate::presentation::errors::AppError;
use crate::presentation::middleware::auth_middleware::AuthContext;
use crate::utils::errors::DomainError;

fn auth_context(parts: &Parts) -> Result<AuthContext, AppError> {
    parts
        .extensions
        .get::<AuthContext>()
        .cloned()
        .ok_or_else(|| DomainError::Unauthorized("login required".to_string()).into())
}

fn require_role(parts: &Parts, role: Role) -> Result<AuthContext, AppError> {
    let ctx = auth_context(parts)?;
    if ctx.role != role {
        return Err(DomainError::Forbidden(format!("{} session required", role)).into());
    }
    Ok(ctx)
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        auth_context(parts)
    }
}

/// 当前登录的普通用户
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::User).map(|ctx| CurrentUser(ctx.subject_id))
    }
}

/// 当前登录的管理员
#[derive(Debug, Clone, Copy)]
pub struct CurrentAdmin(pub Uuid);

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::Admin).map(|ctx| CurrentAdmin(ctx.subject_id))
    }
}
