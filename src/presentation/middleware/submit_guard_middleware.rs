// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::presentation::errors::AppError;
use crate::presentation::middleware::auth_middleware::AuthContext;
use crate::presentation::middleware::submit_guard::SubmitGuard;
use crate::utils::errors::DomainError;

/// 防重复提交中间件
///
/// 只拦截已认证的写请求；处理失败的请求会释放标记以便用户修正后重试。
/// 需要放在认证中间件之内。
pub async fn submit_guard_middleware(
    State(guard): State<Arc<SubmitGuard>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let is_write = matches!(
        *request.method(),
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );
    let subject = request
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.subject_id);

    let Some(subject) = subject.filter(|_| is_write) else {
        return Ok(next.run(request).await);
    };

    let key = (
        subject,
        request.method().to_string(),
        request.uri().path().to_string(),
    );
    if !guard.try_acquire(key.clone()) {
        debug!("Duplicate submission rejected: {} {}", key.1, key.2);
        return Err(DomainError::DuplicateSubmission.into());
    }

    let response = next.run(request).await;
    if !response.status().is_success() {
        guard.release(&key);
    }
    Ok(response)
}
