// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::application::dto::auth_request::{LoginRequestDto, RegisterRequestDto};
use crate::application::dto::responses::{AuthResponse, UserProfileDto};
use crate::application::use_cases::accounts::AccountUseCase;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::auth::CurrentUser;
use crate::presentation::middleware::auth_middleware::AuthContext;
use crate::presentation::response::ApiResponse;

/// 注册普通用户并直接登录
pub async fn register(
    Extension(accounts): Extension<Arc<AccountUseCase>>,
    Json(payload): Json<RegisterRequestDto>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let auth = accounts.register(payload).await?;
    Ok(ApiResponse::created(auth))
}

pub async fn login(
    Extension(accounts): Extension<Arc<AccountUseCase>>,
    Json(payload): Json<LoginRequestDto>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    Ok(ApiResponse::ok(accounts.login(payload).await?))
}

pub async fn admin_login(
    Extension(accounts): Extension<Arc<AccountUseCase>>,
    Json(payload): Json<LoginRequestDto>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    Ok(ApiResponse::ok(accounts.admin_login(payload).await?))
}

/// 注销当前会话，用户与管理员通用
pub async fn logout(
    Extension(accounts): Extension<Arc<AccountUseCase>>,
    ctx: AuthContext,
) -> Result<ApiResponse<Value>, AppError> {
    accounts.logout(&ctx.token).await?;
    Ok(ApiResponse::ok(json!({ "logged_out": true })))
}

pub async fn me(
    Extension(accounts): Extension<Arc<AccountUseCase>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<ApiResponse<UserProfileDto>, AppError> {
    Ok(ApiResponse::ok(accounts.profile(user_id).await?))
}
