// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 管理端统计概览
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_jobs: u64,
    pub active_jobs: u64,
    pub total_users: u64,
    pub common_users: u64,
    pub temp_members: u64,
    pub official_members: u64,
    pub codes_used: u64,
    pub codes_unused: u64,
    pub total_views: i64,
    pub top_jobs: Vec<TopJob>,
    pub generated_at: DateTime<Utc>,
}

/// 浏览量排行中的一项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopJob {
    pub job_id: Uuid,
    pub title: String,
    pub company: String,
    pub view_count: i64,
}

impl Statistics {
    /// 展开为 `metric,value` 行，供 CSV 导出
    pub fn metric_rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("total_jobs".to_string(), self.total_jobs.to_string()),
            ("active_jobs".to_string(), self.active_jobs.to_string()),
            ("total_users".to_string(), self.total_users.to_string()),
            ("common_users".to_string(), self.common_users.to_string()),
            ("temp_members".to_string(), self.temp_members.to_string()),
            ("official_members".to_string(), self.official_members.to_string()),
            ("codes_used".to_string(), self.codes_used.to_string()),
            ("codes_unused".to_string(), self.codes_unused.to_string()),
            ("total_views".to_string(), self.total_views.to_string()),
        ];
        for (rank, job) in self.top_jobs.iter().enumerate() {
            rows.push((
                format!("top_job_{}", rank + 1),
                format!("{} @ {} ({} views)", job.title, job.company, job.view_count),
            ));
        }
        rows.push(("generated_at".to_string(), self.generated_at.to_rfc3339()));
        rows
    }
}
