// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 投递流程阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStage {
    Applied,
    WrittenTest,
    Interview,
    Offer,
    Rejected,
}

impl fmt::Display for ApplicationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationStage::Applied => write!(f, "applied"),
            ApplicationStage::WrittenTest => write!(f, "written_test"),
            ApplicationStage::Interview => write!(f, "interview"),
            ApplicationStage::Offer => write!(f, "offer"),
            ApplicationStage::Rejected => write!(f, "rejected"),
        }
    }
}

/// 单个岗位的投递进度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStageEntry {
    pub job_id: Uuid,
    pub stage: ApplicationStage,
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// 用户的投递进度表，每个用户一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStates {
    pub user_id: Uuid,
    pub entries: Vec<JobStageEntry>,
    pub updated_at: DateTime<Utc>,
}

impl JobStates {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            entries: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn stage_of(&self, job_id: Uuid) -> Option<ApplicationStage> {
        self.entries
            .iter()
            .find(|e| e.job_id == job_id)
            .map(|e| e.stage)
    }

    /// 更新或插入某岗位的阶段
    pub fn upsert(&mut self, job_id: Uuid, stage: ApplicationStage, note: Option<String>) {
        let now = Utc::now();
        match self.entries.iter_mut().find(|e| e.job_id == job_id) {
            Some(entry) => {
                entry.stage = stage;
                entry.note = note;
                entry.updated_at = now;
            }
            None => self.entries.push(JobStageEntry {
                job_id,
                stage,
                note,
                updated_at: now,
            }),
        }
        self.updated_at = now;
    }

    pub fn remove(&mut self, job_id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.job_id != job_id);
        let removed = before != self.entries.len();
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_existing_stage() {
        let mut states = JobStates::empty(Uuid::new_v4());
        let job = Uuid::new_v4();

        states.upsert(job, ApplicationStage::Applied, None);
        states.upsert(job, ApplicationStage::Interview, Some("二面".to_string()));

        assert_eq!(states.entries.len(), 1);
        assert_eq!(states.stage_of(job), Some(ApplicationStage::Interview));
        assert_eq!(states.entries[0].note.as_deref(), Some("二面"));
        assert!(states.remove(job));
        assert_eq!(states.stage_of(job), None);
    }
}
