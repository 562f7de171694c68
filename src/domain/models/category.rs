// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 岗位分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    /// 分类名称，全局唯一
    pub name: String,
    pub kind: CategoryKind,
    /// 同类分类内的展示顺序
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, kind: CategoryKind, sort_order: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            kind,
            sort_order,
            created_at: Utc::now(),
        }
    }
}

/// 分类类型
///
/// 每个岗位最多一个企业性质分类、最多两个其他分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// 企业性质（国企、外企、民企……）
    Nature,
    /// 其他分类（行业、方向……）
    Other,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Nature => write!(f, "nature"),
            CategoryKind::Other => write!(f, "other"),
        }
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nature" | "企业性质" => Ok(CategoryKind::Nature),
            "other" | "其他" => Ok(CategoryKind::Other),
            other => Err(format!("unknown category kind: {}", other)),
        }
    }
}
