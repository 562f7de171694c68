// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::job_repository::RepositoryError;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{DbErr, SqlErr};
use serde_json::Value as Json;
use uuid::Uuid;

/// ID 数组写入 JSON 列
pub fn ids_to_json(ids: &[Uuid]) -> Json {
    Json::Array(ids.iter().map(|id| Json::String(id.to_string())).collect())
}

/// 从 JSON 列读取 ID 数组
pub fn json_to_ids(value: Json, column: &str) -> Result<Vec<Uuid>, RepositoryError> {
    serde_json::from_value(value)
        .map_err(|e| RepositoryError::Corrupted(format!("{}: {}", column, e)))
}

/// 唯一约束冲突映射为 `Conflict`，其余保持数据库错误
pub fn map_write_error(err: DbErr, what: &str) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            RepositoryError::Conflict(format!("{} already exists", what))
        }
        _ => match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepositoryError::NotFound,
            other => RepositoryError::Database(other),
        },
    }
}

/// 统一转换为 UTC 偏移的时间，保证 SQLite 中的文本比较有序
pub fn to_db_time(time: DateTime<Utc>) -> DateTime<FixedOffset> {
    time.fixed_offset()
}

pub fn from_db_time(time: DateTime<FixedOffset>) -> DateTime<Utc> {
    time.with_timezone(&Utc)
}
