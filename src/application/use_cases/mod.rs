// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::services::csv_import::CsvParseError;
use crate::utils::errors::DomainError;

/// 用例模块
///
/// - 账号（accounts）：注册、登录、会话校验与初始管理员
/// - 岗位浏览（browse_jobs）：筛选，会员额度由 job_gate 统一计算
/// - 用户行为（user_activity）：收藏、投递与投递进度
/// - 激活码兑换（redeem_code）与管理（manage_codes）
/// - 目录管理（manage_catalog）：岗位、分类、标签
/// - CSV 导入（import_jobs）
/// - 统计（statistics）
pub mod accounts;
pub mod browse_jobs;
pub mod import_jobs;
pub mod job_gate;
pub mod manage_catalog;
pub mod manage_codes;
pub mod redeem_code;
pub mod statistics;
pub mod user_activity;

#[cfg(test)]
pub(crate) mod test_support;

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("Invalid CSV: {0}")]
    Csv(#[from] CsvParseError),
}

impl From<ValidationErrors> for UseCaseError {
    fn from(errors: ValidationErrors) -> Self {
        UseCaseError::Validation(errors.to_string())
    }
}
