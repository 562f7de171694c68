// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Path, Query};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::job_request::JobListQuery;
use crate::application::dto::responses::JobListResponse;
use crate::application::use_cases::browse_jobs::BrowseJobsUseCase;
use crate::domain::models::category::Category;
use crate::domain::models::job::Job;
use crate::domain::models::tag::Tag;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::auth::CurrentUser;
use crate::presentation::response::ApiResponse;

/// 岗位列表，按会员等级限制可见数量
pub async fn list_jobs(
    Extension(browse): Extension<Arc<BrowseJobsUseCase>>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<JobListQuery>,
) -> Result<ApiResponse<JobListResponse>, AppError> {
    Ok(ApiResponse::ok(browse.list(user_id, &query).await?))
}

/// 岗位详情，同时增加浏览数
pub async fn get_job(
    Extension(browse): Extension<Arc<BrowseJobsUseCase>>,
    CurrentUser(user_id): CurrentUser,
    Path(job_id): Path<Uuid>,
) -> Result<ApiResponse<Job>, AppError> {
    Ok(ApiResponse::ok(browse.detail(user_id, job_id).await?))
}

pub async fn list_categories(
    Extension(browse): Extension<Arc<BrowseJobsUseCase>>,
    CurrentUser(_): CurrentUser,
) -> Result<ApiResponse<Vec<Category>>, AppError> {
    Ok(ApiResponse::ok(browse.categories().await?))
}

pub async fn list_tags(
    Extension(browse): Extension<Arc<BrowseJobsUseCase>>,
    CurrentUser(_): CurrentUser,
) -> Result<ApiResponse<Vec<Tag>>, AppError> {
    Ok(ApiResponse::ok(browse.tags().await?))
}
