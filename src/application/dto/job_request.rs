// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::job::{Education, JobDraft, JobType};

/// 管理端创建或修改岗位的请求体
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct JobRequestDto {
    #[validate(length(min = 1, max = 128, message = "title must be 1-128 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 128, message = "company must be 1-128 characters"))]
    pub company: String,
    #[validate(length(min = 1, max = 64, message = "city must be 1-64 characters"))]
    pub city: String,
    pub job_type: JobType,
    #[serde(default)]
    pub education: Education,
    #[validate(length(max = 64))]
    pub salary: Option<String>,
    pub description: Option<String>,
    #[validate(url(message = "apply_url must be a valid URL"))]
    pub apply_url: String,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

impl JobRequestDto {
    pub fn into_draft(self) -> JobDraft {
        JobDraft {
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            city: self.city.trim().to_string(),
            job_type: self.job_type,
            education: self.education,
            salary: non_blank(self.salary),
            description: non_blank(self.description),
            apply_url: self.apply_url.trim().to_string(),
            deadline: self.deadline,
            category_ids: self.category_ids,
            tag_ids: self.tag_ids,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 用户端岗位列表查询参数
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct JobListQuery {
    pub category: Option<Uuid>,
    pub tag: Option<Uuid>,
    pub keyword: Option<String>,
    pub city: Option<String>,
    pub job_type: Option<JobType>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SetActiveDto {
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub dry_run: bool,
}
