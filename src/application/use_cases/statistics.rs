// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use super::UseCaseError;
use crate::application::data_access::DataAccess;
use crate::domain::models::statistics::Statistics;
use crate::domain::services::csv_export::statistics_to_csv;

/// 管理端统计概览与导出
pub struct StatisticsUseCase {
    data: Arc<DataAccess>,
}

impl StatisticsUseCase {
    pub fn new(data: Arc<DataAccess>) -> Self {
        Self { data }
    }

    pub async fn overview(&self) -> Result<Statistics, UseCaseError> {
        Ok(self.data.statistics().await?)
    }

    pub async fn export_csv(&self) -> Result<String, UseCaseError> {
        let stats = self.data.statistics().await?;
        Ok(statistics_to_csv(&stats))
    }
}
