// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::application::data_access::DataAccess;
use crate::domain::repositories::account_repository::SessionRepository;
use crate::domain::repositories::job_repository::RepositoryError;

/// 单次清理的结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepOutcome {
    pub downgraded: usize,
    pub sessions_purged: u64,
}

/// 会员过期清理工作器
///
/// 定期将过期会员降级为普通用户，并删除过期会话
pub struct MembershipExpiryWorker {
    data: Arc<DataAccess>,
    sessions: Arc<dyn SessionRepository>,
    interval: Duration,
}

impl MembershipExpiryWorker {
    pub fn new(
        data: Arc<DataAccess>,
        sessions: Arc<dyn SessionRepository>,
        interval: Duration,
    ) -> Self {
        Self {
            data,
            sessions,
            interval,
        }
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!(
            "Membership expiry worker started (interval {:?})",
            self.interval
        );

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.sweep(Utc::now()).await {
                Ok(outcome) => {
                    if outcome.downgraded > 0 || outcome.sessions_purged > 0 {
                        info!(
                            "Downgraded {} expired memberships, purged {} sessions",
                            outcome.downgraded, outcome.sessions_purged
                        );
                    }
                }
                Err(e) => {
                    error!("Failed to sweep expired memberships: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepOutcome, RepositoryError> {
        let downgraded = self.data.downgrade_expired_memberships(now).await?;
        counter!("memberships_expired_total").increment(downgraded.len() as u64);

        let sessions_purged = self.sessions.purge_expired(now).await?;
        Ok(SweepOutcome {
            downgraded: downgraded.len(),
            sessions_purged,
        })
    }
}

#[cfg(test)]
#[path = "membership_expiry_worker_test.rs"]
mod tests;
