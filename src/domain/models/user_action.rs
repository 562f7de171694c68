// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户行为记录
///
/// 每个用户一行，保存收藏与已投递的岗位 ID 列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActions {
    pub user_id: Uuid,
    pub favorited_job_ids: Vec<Uuid>,
    pub applied_job_ids: Vec<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl UserActions {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            favorited_job_ids: Vec::new(),
            applied_job_ids: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// 切换收藏状态，返回切换后是否为已收藏
    pub fn toggle_favorite(&mut self, job_id: Uuid) -> bool {
        if self.remove_favorite(job_id) {
            false
        } else {
            self.add_favorite(job_id)
        }
    }

    /// 加入收藏，已收藏时返回 false
    pub fn add_favorite(&mut self, job_id: Uuid) -> bool {
        if self.favorited_job_ids.contains(&job_id) {
            return false;
        }
        self.favorited_job_ids.push(job_id);
        self.updated_at = Utc::now();
        true
    }

    /// 取消收藏，未收藏时返回 false
    pub fn remove_favorite(&mut self, job_id: Uuid) -> bool {
        let Some(pos) = self.favorited_job_ids.iter().position(|id| *id == job_id) else {
            return false;
        };
        self.favorited_job_ids.remove(pos);
        self.updated_at = Utc::now();
        true
    }

    /// 标记为已投递，已存在时返回 false
    pub fn add_applied(&mut self, job_id: Uuid) -> bool {
        if self.applied_job_ids.contains(&job_id) {
            return false;
        }
        self.applied_job_ids.push(job_id);
        self.updated_at = Utc::now();
        true
    }

    /// 取消投递标记，不存在时返回 false
    pub fn remove_applied(&mut self, job_id: Uuid) -> bool {
        let before = self.applied_job_ids.len();
        self.applied_job_ids.retain(|id| *id != job_id);
        let removed = self.applied_job_ids.len() != before;
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
    fn test_toggle_favorite() {
        let mut actions = UserActions::empty(Uuid::new_v4());
        let job = Uuid::new_v4();

        assert!(actions.toggle_favorite(job));
        assert_eq!(actions.favorited_job_ids, vec![job]);
        assert!(!actions.toggle_favorite(job));
        assert!(actions.favorited_job_ids.is_empty());
    }

    #[test]
    fn test_add_and_remove_favorite_are_idempotent() {
        let mut actions = UserActions::empty(Uuid::new_v4());
        let job = Uuid::new_v4();

        assert!(actions.add_favorite(job));
        assert!(!actions.add_favorite(job));
        assert_eq!(actions.favorited_job_ids.len(), 1);
        assert!(actions.remove_favorite(job));
        assert!(!actions.remove_favorite(job));
    }

    #[test]
    fn test_applied_is_a_set() {
        let mut actions = UserActions::empty(Uuid::new_v4());
        let job = Uuid::new_v4();

        assert!(actions.add_applied(job));
        assert!(!actions.add_applied(job));
        assert_eq!(actions.applied_job_ids.len(), 1);
        assert!(actions.remove_applied(job));
        assert!(!actions.remove_applied(job));
    }
}
