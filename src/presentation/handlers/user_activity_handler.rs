// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::job_state_request::JobStateRequestDto;
use crate::application::dto::responses::{ApplyResponse, FavoriteToggleResponse};
use crate::application::use_cases::user_activity::UserActivityUseCase;
use crate::domain::models::job::Job;
use crate::domain::models::job_state::JobStates;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::auth::CurrentUser;
use crate::presentation::response::ApiResponse;

pub async fn toggle_favorite(
    Extension(activity): Extension<Arc<UserActivityUseCase>>,
    CurrentUser(user_id): CurrentUser,
    Path(job_id): Path<Uuid>,
) -> Result<ApiResponse<FavoriteToggleResponse>, AppError> {
    Ok(ApiResponse::ok(
        activity.toggle_favorite(user_id, job_id).await?,
    ))
}

pub async fn list_favorites(
    Extension(activity): Extension<Arc<UserActivityUseCase>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<ApiResponse<Vec<Job>>, AppError> {
    Ok(ApiResponse::ok(activity.favorites(user_id).await?))
}

pub async fn apply_job(
    Extension(activity): Extension<Arc<UserActivityUseCase>>,
    CurrentUser(user_id): CurrentUser,
    Path(job_id): Path<Uuid>,
) -> Result<ApiResponse<ApplyResponse>, AppError> {
    Ok(ApiResponse::ok(activity.apply(user_id, job_id).await?))
}

pub async fn withdraw_job(
    Extension(activity): Extension<Arc<UserActivityUseCase>>,
    CurrentUser(user_id): CurrentUser,
    Path(job_id): Path<Uuid>,
) -> Result<ApiResponse<ApplyResponse>, AppError> {
    Ok(ApiResponse::ok(activity.withdraw(user_id, job_id).await?))
}

pub async fn list_applied(
    Extension(activity): Extension<Arc<UserActivityUseCase>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<ApiResponse<Vec<Job>>, AppError> {
    Ok(ApiResponse::ok(activity.applied(user_id).await?))
}

pub async fn list_job_states(
    Extension(activity): Extension<Arc<UserActivityUseCase>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<ApiResponse<JobStates>, AppError> {
    Ok(ApiResponse::ok(activity.job_states(user_id).await?))
}

pub async fn put_job_state(
    Extension(activity): Extension<Arc<UserActivityUseCase>>,
    CurrentUser(user_id): CurrentUser,
    Path(job_id): Path<Uuid>,
    Json(payload): Json<JobStateRequestDto>,
) -> Result<ApiResponse<JobStates>, AppError> {
    Ok(ApiResponse::ok(
        activity.set_job_state(user_id, job_id, payload).await?,
    ))
}

pub async fn delete_job_state(
    Extension(activity): Extension<Arc<UserActivityUseCase>>,
    CurrentUser(user_id): CurrentUser,
    Path(job_id): Path<Uuid>,
) -> Result<ApiResponse<JobStates>, AppError> {
    Ok(ApiResponse::ok(
        activity.remove_job_state(user_id, job_id).await?,
    ))
}
