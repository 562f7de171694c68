// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

/// 防重复提交的键：提交者、动作（HTTP 方法）、目标（路径）
pub type SubmitKey = (Uuid, String, String);

/// 超过该数量时在下次提交前清理已过期的标记
const PRUNE_THRESHOLD: usize = 1024;

/// 防重复提交守卫
///
/// 为每个提交键记录最近一次提交时间，窗口期内的重复提交被拒绝。
#[derive(Clone, Debug)]
pub struct SubmitGuard {
    in_flight: Arc<DashMap<SubmitKey, Instant>>,
    window: Duration,
}

impl SubmitGuard {
    /// 创建一个新的SubmitGuard实例
    ///
    /// # 参数
    ///
    /// * `window` - 同一提交键的最短间隔
    pub fn new(window: Duration) -> Self {
        Self {
            in_flight: Arc::new(DashMap::new()),
            window,
        }
    }

    /// 尝试登记一次提交
    ///
    /// # 返回值
    ///
    /// 窗口期内已有相同提交时返回 false
    pub fn try_acquire(&self, key: SubmitKey) -> bool {
        let now = Instant::now();
        if self.in_flight.len() > PRUNE_THRESHOLD {
            self.prune(now);
        }

        let mut accepted = true;
        self.in_flight
            .entry(key)
            .and_modify(|at| {
                if now.duration_since(*at) < self.window {
                    accepted = false;
                } else {
                    *at = now;
                }
            })
            .or_insert(now);
        accepted
    }

    /// 释放提交标记，允许立即重试
    pub fn release(&self, key: &SubmitKey) {
        self.in_flight.remove(key);
    }

    fn prune(&self, now: Instant) {
        let window = self.window;
        self.in_flight
            .retain(|_, at| now.duration_since(*at) < window);
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(subject: Uuid, path: &str) -> SubmitKey {
        (subject, "POST".to_string(), path.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_within_window_is_rejected() {
        let guard = SubmitGuard::new(Duration::from_millis(1500));
        let user = Uuid::new_v4();

        assert!(guard.try_acquire(key(user, "/v1/activation/redeem")));
        assert!(!guard.try_acquire(key(user, "/v1/activation/redeem")));
        // 不同目标或不同用户互不影响
        assert!(guard.try_acquire(key(user, "/v1/jobs/1/apply")));
        assert!(guard.try_acquire(key(Uuid::new_v4(), "/v1/activation/redeem")));

        tokio::time::advance(Duration::from_millis(1501)).await;
        assert!(guard.try_acquire(key(user, "/v1/activation/redeem")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_allows_retry() {
        let guard = SubmitGuard::new(Duration::from_secs(10));
        let user = Uuid::new_v4();

        assert!(guard.try_acquire(key(user, "/v1/activation/redeem")));
        guard.release(&key(user, "/v1/activation/redeem"));
        assert!(guard.try_acquire(key(user, "/v1/activation/redeem")));
    }
}
