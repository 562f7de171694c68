// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::UseCaseError;
use crate::application::data_access::DataAccess;
use crate::application::dto::activation_request::GenerateCodesDto;
use crate::domain::models::activation_code::{ActivationCode, CodeFilter};
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::services::csv_export::codes_to_csv;
use crate::utils::errors::DomainError;

/// 管理端激活码管理
pub struct ActivationCodeAdminUseCase {
    data: Arc<DataAccess>,
}

impl ActivationCodeAdminUseCase {
    pub fn new(data: Arc<DataAccess>) -> Self {
        Self { data }
    }

    /// 批量生成激活码，同一批次内保证不重复
    pub async fn generate(
        &self,
        dto: GenerateCodesDto,
    ) -> Result<Vec<ActivationCode>, UseCaseError> {
        dto.validate()?;

        let note = dto
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let mut seen = HashSet::new();
        let mut codes = Vec::with_capacity(dto.count as usize);
        while codes.len() < dto.count as usize {
            let code = ActivationCode::generate(dto.tier, dto.validity_days, note.clone());
            if seen.insert(code.code.clone()) {
                codes.push(code);
            }
        }

        self.data.create_activation_codes(&codes).await?;
        info!(
            "Generated {} {} activation codes valid for {} days",
            codes.len(),
            dto.tier,
            dto.validity_days
        );
        Ok(codes)
    }

    pub async fn list(&self, filter: CodeFilter) -> Result<Vec<ActivationCode>, UseCaseError> {
        Ok(self.data.activation_codes(filter).await?)
    }

    /// 删除未使用的激活码
    pub async fn delete(&self, id: Uuid) -> Result<(), UseCaseError> {
        match self.data.delete_activation_code(id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => {
                Err(DomainError::NotFound("activation code".to_string()).into())
            }
            Err(RepositoryError::Conflict(_)) => Err(DomainError::Conflict(
                "used activation codes cannot be deleted".to_string(),
            )
            .into()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn export_csv(&self, filter: CodeFilter) -> Result<String, UseCaseError> {
        let codes = self.data.activation_codes(filter).await?;
        Ok(codes_to_csv(&codes))
    }
}
