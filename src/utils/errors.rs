// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 领域层错误类型
///
/// 业务规则校验失败时返回，展示层据此映射 HTTP 状态码
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("duplicate submission, please retry later")]
    DuplicateSubmission,
}

/// 缓存错误类型
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("缓存序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Redis错误: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("缓存配置错误: {0}")]
    Configuration(String),
}
