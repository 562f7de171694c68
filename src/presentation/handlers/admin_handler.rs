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

use crate::application::dto::catalog_request::{CategoryRequestDto, TagRequestDto};
use crate::application::dto::job_request::{ImportQuery, JobRequestDto, SetActiveDto};
use crate::application::dto::responses::UserProfileDto;
use crate::application::use_cases::accounts::AccountUseCase;
use crate::application::use_cases::import_jobs::ImportJobsUseCase;
use crate::application::use_cases::manage_catalog::CatalogAdminUseCase;
use crate::application::use_cases::statistics::StatisticsUseCase;
use crate::domain::models::category::Category;
use crate::domain::models::job::Job;
use crate::domain::models::statistics::Statistics;
use crate::domain::models::tag::Tag;
use crate::domain::services::csv_import::ImportReport;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::auth::CurrentAdmin;
use crate::presentation::response::{csv_attachment, ApiResponse};

// ---- 岗位 ----

/// 所有岗位，包括已下架的
pub async fn list_jobs(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<ApiResponse<Vec<Job>>, AppError> {
    Ok(ApiResponse::ok(catalog.list_jobs().await?))
}

pub async fn get_job(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Job>, AppError> {
    Ok(ApiResponse::ok(catalog.get_job(id).await?))
}

pub async fn create_job(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Json(payload): Json<JobRequestDto>,
) -> Result<ApiResponse<Job>, AppError> {
    Ok(ApiResponse::created(catalog.create_job(payload).await?))
}

pub async fn update_job(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<JobRequestDto>,
) -> Result<ApiResponse<Job>, AppError> {
    Ok(ApiResponse::ok(catalog.update_job(id, payload).await?))
}

pub async fn delete_job(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Value>, AppError> {
    catalog.delete_job(id).await?;
    Ok(ApiResponse::ok(json!({ "deleted": id })))
}

/// 上架或下架岗位
pub async fn set_job_active(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetActiveDto>,
) -> Result<ApiResponse<Job>, AppError> {
    Ok(ApiResponse::ok(
        catalog.set_job_active(id, payload.is_active).await?,
    ))
}

/// CSV 批量导入，请求体为 CSV 文本
pub async fn import_jobs(
    Extension(import): Extension<Arc<ImportJobsUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Query(query): Query<ImportQuery>,
    body: String,
) -> Result<ApiResponse<ImportReport>, AppError> {
    Ok(ApiResponse::ok(import.import(&body, query.dry_run).await?))
}

// ---- 分类 ----

pub async fn list_categories(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<ApiResponse<Vec<Category>>, AppError> {
    Ok(ApiResponse::ok(catalog.list_categories().await?))
}

pub async fn create_category(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Json(payload): Json<CategoryRequestDto>,
) -> Result<ApiResponse<Category>, AppError> {
    Ok(ApiResponse::created(catalog.create_category(payload).await?))
}

pub async fn update_category(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequestDto>,
) -> Result<ApiResponse<Category>, AppError> {
    Ok(ApiResponse::ok(catalog.update_category(id, payload).await?))
}

pub async fn delete_category(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Value>, AppError> {
    catalog.delete_category(id).await?;
    Ok(ApiResponse::ok(json!({ "deleted": id })))
}

// ---- 标签 ----

pub async fn list_tags(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<ApiResponse<Vec<Tag>>, AppError> {
    Ok(ApiResponse::ok(catalog.list_tags().await?))
}

pub async fn create_tag(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Json(payload): Json<TagRequestDto>,
) -> Result<ApiResponse<Tag>, AppError> {
    Ok(ApiResponse::created(catalog.create_tag(payload).await?))
}

pub async fn update_tag(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<TagRequestDto>,
) -> Result<ApiResponse<Tag>, AppError> {
    Ok(ApiResponse::ok(catalog.update_tag(id, payload).await?))
}

pub async fn delete_tag(
    Extension(catalog): Extension<Arc<CatalogAdminUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Value>, AppError> {
    catalog.delete_tag(id).await?;
    Ok(ApiResponse::ok(json!({ "deleted": id })))
}

// ---- 用户 ----

pub async fn list_users(
    Extension(accounts): Extension<Arc<AccountUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<ApiResponse<Vec<UserProfileDto>>, AppError> {
    Ok(ApiResponse::ok(accounts.list_users().await?))
}

/// 启用或禁用用户，禁用后其会话立即失效
pub async fn set_user_active(
    Extension(accounts): Extension<Arc<AccountUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetActiveDto>,
) -> Result<ApiResponse<UserProfileDto>, AppError> {
    Ok(ApiResponse::ok(
        accounts.set_user_active(id, payload.is_active).await?,
    ))
}

// ---- 统计 ----

pub async fn statistics(
    Extension(stats): Extension<Arc<StatisticsUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<ApiResponse<Statistics>, AppError> {
    Ok(ApiResponse::ok(stats.overview().await?))
}

pub async fn export_statistics(
    Extension(stats): Extension<Arc<StatisticsUseCase>>,
    CurrentAdmin(_): CurrentAdmin,
) -> Result<Response, AppError> {
    let csv = stats.export_csv().await?;
    Ok(csv_attachment("statistics.csv", csv))
}
