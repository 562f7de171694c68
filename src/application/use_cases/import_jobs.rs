// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use std::sync::Arc;
use tracing::info;

use super::UseCaseError;
use crate::application::data_access::DataAccess;
use crate::domain::models::job::Job;
use crate::domain::services::csv_import::{ImportReport, JobRowValidator};

/// CSV 批量导入岗位
///
/// 表头缺少必填列时整个文件被拒绝；否则合法行入库，非法行写入报告。
pub struct ImportJobsUseCase {
    data: Arc<DataAccess>,
}

impl ImportJobsUseCase {
    pub fn new(data: Arc<DataAccess>) -> Self {
        Self { data }
    }

    pub async fn import(&self, csv: &str, dry_run: bool) -> Result<ImportReport, UseCaseError> {
        let categories = self.data.categories().await?;
        let tags = self.data.tags().await?;
        let validated = JobRowValidator::new(&categories, &tags).validate_csv(csv)?;

        let valid_rows = validated.rows.len();
        let imported = if dry_run {
            0
        } else {
            let jobs: Vec<Job> = validated
                .rows
                .into_iter()
                .map(|row| Job::from_draft(row.draft))
                .collect();
            let inserted = self.data.import_jobs(jobs).await? as usize;
            counter!("jobs_imported_total").increment(inserted as u64);
            inserted
        };

        info!(
            "CSV import: {} rows, {} valid, {} imported, {} errors (dry_run = {})",
            validated.total_rows,
            valid_rows,
            imported,
            validated.errors.len(),
            dry_run
        );

        Ok(ImportReport {
            total_rows: validated.total_rows,
            imported,
            dry_run,
            errors: validated.errors,
        })
    }
}
