// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 招聘岗位实体
///
/// 由管理员创建或批量导入，普通用户浏览、收藏与投递。
/// `is_active` 为 false 的岗位对用户端不可见（软下架）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// 岗位唯一标识符
    pub id: Uuid,
    /// 岗位名称
    pub title: String,
    /// 招聘企业
    pub company: String,
    /// 工作城市
    pub city: String,
    /// 岗位类型
    pub job_type: JobType,
    /// 学历要求
    pub education: Education,
    /// 薪资描述，原样展示
    pub salary: Option<String>,
    /// 岗位描述
    pub description: Option<String>,
    /// 投递链接
    pub apply_url: String,
    /// 截止日期
    pub deadline: Option<NaiveDate>,
    /// 所属分类
    pub category_ids: Vec<Uuid>,
    /// 所属标签
    pub tag_ids: Vec<Uuid>,
    /// 是否上架
    pub is_active: bool,
    /// 浏览次数
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建或编辑岗位时的可写字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub city: String,
    pub job_type: JobType,
    pub education: Education,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub apply_url: String,
    pub deadline: Option<NaiveDate>,
    pub category_ids: Vec<Uuid>,
    pub tag_ids: Vec<Uuid>,
}

impl Job {
    /// 由草稿创建一个新的上架岗位
    pub fn from_draft(draft: JobDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            company: draft.company,
            city: draft.city,
            job_type: draft.job_type,
            education: draft.education,
            salary: draft.salary,
            description: draft.description,
            apply_url: draft.apply_url,
            deadline: draft.deadline,
            category_ids: draft.category_ids,
            tag_ids: draft.tag_ids,
            is_active: true,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// 用草稿覆盖可写字段，保留浏览数与上架状态
    pub fn apply_draft(&mut self, draft: JobDraft) {
        self.title = draft.title;
        self.company = draft.company;
        self.city = draft.city;
        self.job_type = draft.job_type;
        self.education = draft.education;
        self.salary = draft.salary;
        self.description = draft.description;
        self.apply_url = draft.apply_url;
        self.deadline = draft.deadline;
        self.category_ids = draft.category_ids;
        self.tag_ids = draft.tag_ids;
        self.updated_at = Utc::now();
    }

    /// 关键字匹配标题、企业和描述（大小写不敏感）
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&keyword)
            || self.company.to_lowercase().contains(&keyword)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&keyword))
                .unwrap_or(false)
    }
}

/// 岗位类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    Internship,
    PartTime,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobType::FullTime => write!(f, "full_time"),
            JobType::Internship => write!(f, "internship"),
            JobType::PartTime => write!(f, "part_time"),
        }
    }
}

impl FromStr for JobType {
    type Err = String;

    /// 同时接受英文取值和中文标签
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full_time" | "fulltime" | "full-time" | "全职" | "校招" => Ok(JobType::FullTime),
            "internship" | "intern" | "实习" => Ok(JobType::Internship),
            "part_time" | "parttime" | "part-time" | "兼职" => Ok(JobType::PartTime),
            other => Err(format!("invalid job_type: {}", other)),
        }
    }
}

/// 学历要求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    #[default]
    Any,
    Associate,
    Bachelor,
    Master,
    Doctor,
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Education::Any => write!(f, "any"),
            Education::Associate => write!(f, "associate"),
            Education::Bachelor => write!(f, "bachelor"),
            Education::Master => write!(f, "master"),
            Education::Doctor => write!(f, "doctor"),
        }
    }
}

impl FromStr for Education {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "不限" => Ok(Education::Any),
            "associate" | "大专" | "专科" => Ok(Education::Associate),
            "bachelor" | "本科" => Ok(Education::Bachelor),
            "master" | "硕士" | "研究生" => Ok(Education::Master),
            "doctor" | "phd" | "博士" => Ok(Education::Doctor),
            other => Err(format!("invalid education: {}", other)),
        }
    }
}
