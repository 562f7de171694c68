// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 发生变更的数据表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTable {
    Jobs,
    Categories,
    Tags,
    Users,
    ActivationCodes,
    UserActions,
    JobStates,
}

impl ChangeTable {
    pub const ALL: [ChangeTable; 7] = [
        ChangeTable::Jobs,
        ChangeTable::Categories,
        ChangeTable::Tags,
        ChangeTable::Users,
        ChangeTable::ActivationCodes,
        ChangeTable::UserActions,
        ChangeTable::JobStates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeTable::Jobs => "jobs",
            ChangeTable::Categories => "categories",
            ChangeTable::Tags => "tags",
            ChangeTable::Users => "users",
            ChangeTable::ActivationCodes => "activation_codes",
            ChangeTable::UserActions => "user_actions",
            ChangeTable::JobStates => "job_states",
        }
    }
}

impl fmt::Display for ChangeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeTable::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("unknown table: {}", s))
    }
}

/// 变更类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// 数据变更事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: ChangeTable,
    pub kind: ChangeKind,
    /// 变更行的主键，批量操作时为空
    pub record_id: Option<Uuid>,
    /// 本次更新涉及的字段，为空表示未知或整行
    pub changed_fields: Vec<String>,
    pub occurred_at: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(table: ChangeTable, kind: ChangeKind, record_id: Option<Uuid>) -> Self {
        Self {
            table,
            kind,
            record_id,
            changed_fields: Vec::new(),
            occurred_at: Utc::now(),
        }
    }

    pub fn insert(table: ChangeTable, record_id: Uuid) -> Self {
        Self::new(table, ChangeKind::Insert, Some(record_id))
    }

    pub fn update(table: ChangeTable, record_id: Uuid) -> Self {
        Self::new(table, ChangeKind::Update, Some(record_id))
    }

    pub fn delete(table: ChangeTable, record_id: Uuid) -> Self {
        Self::new(table, ChangeKind::Delete, Some(record_id))
    }

    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.changed_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }
}
