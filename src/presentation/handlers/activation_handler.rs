// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    response::Response,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::activation_request::{
    CodeListQuery, GenerateCodesDto, RedeemRequestDto,
};
use crate::application::dto::responses::RedemptionResponse;
use crate::application::use_cases::manage_codes::ActivationCodeAdminUseCase;
use crate::application::use_cases::redeem_code::RedeemCodeUseCase;
use crate::domain::models::activation_code::ActivationCode;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::auth::{CurrentAdmin, CurrentUser};
use crate::presentation::response::{csv_attachment, ApiResponse};

/// 兑换激活码
pub async fn redeem(
    Extension(redeem): Extension<Arc<RedeemCodeUseCase>>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<RedeemRequestDto>,
) -> Result<ApiResponse<RedemptionResponse>, AppError> {
    Ok(ApiResponse::ok(redeem.redeem(user_id, payload).await?))
}

pub async fn generate_codes(
    Extension(codes): Extension<Arc<ActivationCodeAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Json(payload): Json<GenerateCodesDto>,
) -> Result<ApiResponse<Vec<ActivationCode>>, AppError> {
    Ok(ApiResponse::created(codes.generate(payload).await?))
}

/// 激活码列表，`?status=used|unused|all`
pub async fn list_codes(
    Extension(codes): Extension<Arc<ActivationCodeAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Query(query): Query<CodeListQuery>,
) -> Result<ApiResponse<Vec<ActivationCode>>, AppError> {
    Ok(ApiResponse::ok(codes.list(query.status).await?))
}

pub async fn delete_code(
    Extension(codes): Extension<Arc<ActivationCodeAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Value>, AppError> {
    codes.delete(id).await?;
    Ok(ApiResponse::ok(json!({ "deleted": id })))
}

pub async fn export_codes(
    Extension(codes): Extension<Arc<ActivationCodeAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Query(query): Query<CodeListQuery>,
) -> Result<Response, AppError> {
    let csv = codes.export_csv(query.status).await?;
    Ok(csv_attachment("activation_codes.csv", csv))
}
