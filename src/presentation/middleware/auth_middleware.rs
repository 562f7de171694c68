// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::application::use_cases::accounts::AccountUseCase;
use crate::domain::models::account::Role;
use crate::presentation::errors::AppError;
use crate::utils::errors::DomainError;

/// 无需登录即可访问的路径
pub const PUBLIC_PATHS: [&str; 5] = [
    "/health",
    "/v1/version",
    "/v1/auth/register",
    "/v1/auth/login",
    "/v1/admin/login",
];

/// 认证上下文
///
/// 认证中间件解析会话后放入请求扩展，供提取器与后续中间件读取
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub subject_id: Uuid,
    pub role: Role,
    pub token: String,
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// 认证中间件
///
/// 在 sessions 表中查找 `Authorization: Bearer <token>` 对应的未过期会话。
///
/// # 参数
///
/// * `accounts` - 账号用例
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
pub async fn auth_middleware(
    State(accounts): State<Arc<AccountUseCase>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    debug!("AuthMiddleware processing path: {}", path);
    if PUBLIC_PATHS.contains(&path) {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(&req)
        .ok_or_else(|| DomainError::Unauthorized("missing bearer token".to_string()))?
        .to_string();

    let session = accounts
        .authenticate(&token)
        .await?
        .ok_or_else(|| DomainError::Unauthorized("invalid or expired session".to_string()))?;

    req.extensions_mut().insert(AuthContext {
        subject_id: session.subject_id,
        role: session.role,
        token,
    });
    Ok(next.run(req).await)
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
