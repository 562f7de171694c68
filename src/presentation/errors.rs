// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::use_cases::UseCaseError;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::services::csv_import::CsvParseError;
use crate::utils::errors::DomainError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口。
/// 响应体为 `{ "success": false, "error": "..." }`，服务端错误不暴露内部细节。
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<UseCaseError>() {
            return match err {
                UseCaseError::Validation(_) | UseCaseError::Csv(_) => StatusCode::BAD_REQUEST,
                UseCaseError::Domain(e) => domain_status(e),
                UseCaseError::Repository(e) => repository_status(e),
            };
        }
        if let Some(err) = self.0.downcast_ref::<DomainError>() {
            return domain_status(err);
        }
        if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            return repository_status(err);
        }
        if self.0.downcast_ref::<CsvParseError>().is_some()
            || self.0.downcast_ref::<validator::ValidationErrors>().is_some()
        {
            return StatusCode::BAD_REQUEST;
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::DuplicateSubmission => StatusCode::TOO_MANY_REQUESTS,
    }
}

fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::Database(_) | RepositoryError::Corrupted(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = if status.is_server_error() {
            error!("Request failed: {:#}", self.0);
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
