// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::settings::CacheSettings;
use crate::infrastructure::cache::cache_strategy::{
    CacheBackend, CacheStats, CacheStrategy, CacheStrategyFactory,
};
use crate::infrastructure::cache::redis_client::RedisClient;
use crate::utils::errors::CacheError;

/// 缓存的数据类型，决定默认过期时间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheDataType {
    Jobs,
    Categories,
    Tags,
    Users,
    UserActions,
    Stats,
}

impl CacheDataType {
    /// 键前缀，所有同类键都以此开头
    pub fn prefix(&self) -> &'static str {
        match self {
            CacheDataType::Jobs => "jobs:",
            CacheDataType::Categories => "categories:",
            CacheDataType::Tags => "tags:",
            CacheDataType::Users => "users:",
            CacheDataType::UserActions => "user_actions:",
            CacheDataType::Stats => "stats:",
        }
    }

    /// 类型默认 TTL
    pub fn default_ttl(&self) -> Duration {
        let secs = match self {
            CacheDataType::Jobs => 300,
            CacheDataType::Categories | CacheDataType::Tags => 1800,
            CacheDataType::Users => 120,
            CacheDataType::UserActions | CacheDataType::Stats => 60,
        };
        Duration::from_secs(secs)
    }

    pub const ALL: [CacheDataType; 6] = [
        CacheDataType::Jobs,
        CacheDataType::Categories,
        CacheDataType::Tags,
        CacheDataType::Users,
        CacheDataType::UserActions,
        CacheDataType::Stats,
    ];
}

/// 缓存过期策略
///
/// 按最长匹配前缀查找 TTL：配置覆盖与类型默认值放在同一张前缀表里，
/// 更具体的前缀优先；都不匹配时使用全局默认值。
#[derive(Debug, Clone)]
pub struct CachePolicy {
    prefixes: Vec<(String, Duration)>,
    default_ttl: Duration,
}

impl CachePolicy {
    pub fn new(default_ttl: Duration) -> Self {
        let mut policy = Self {
            prefixes: Vec::new(),
            default_ttl,
        };
        for data_type in CacheDataType::ALL {
            policy.insert(data_type.prefix(), data_type.default_ttl());
        }
        policy
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        let mut policy = Self::new(Duration::from_secs(settings.default_ttl_secs));
        for (prefix, secs) in &settings.ttl_overrides {
            policy.insert(prefix, Duration::from_secs(*secs));
        }
        policy
    }

    /// 设置或覆盖某个前缀的 TTL
    pub fn with_override(mut self, prefix: &str, ttl: Duration) -> Self {
        self.insert(prefix, ttl);
        self
    }

    fn insert(&mut self, prefix: &str, ttl: Duration) {
        match self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
            Some(existing) => existing.1 = ttl,
            None => self.prefixes.push((prefix.to_string(), ttl)),
        }
    }

    /// 查找键对应的 TTL
    pub fn ttl_for(&self, key: &str) -> Duration {
        self.prefixes
            .iter()
            .filter(|(prefix, _)| key.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, ttl)| *ttl)
            .unwrap_or(self.default_ttl)
    }
}

/// 缓存管理器
///
/// 在缓存策略之上提供类型化读写、按策略计算 TTL、前缀失效和命中统计。
/// 缓存故障只记录日志，不影响请求本身。
pub struct CacheManager {
    strategy: Arc<RwLock<Box<dyn CacheStrategy>>>,
    policy: CachePolicy,
}

impl CacheManager {
    /// 创建新的缓存管理器
    pub fn new(strategy: Box<dyn CacheStrategy>, policy: CachePolicy) -> Self {
        Self {
            strategy: Arc::new(RwLock::new(strategy)),
            policy,
        }
    }

    /// 按配置创建缓存管理器
    pub fn from_settings(
        settings: &CacheSettings,
        redis_url: Option<&str>,
    ) -> Result<Self, CacheError> {
        let backend: CacheBackend = settings.backend.parse()?;
        let redis_client = match (backend, redis_url) {
            (CacheBackend::Redis, Some(url)) => Some(Arc::new(RedisClient::new(url)?)),
            _ => None,
        };

        let strategy =
            CacheStrategyFactory::create_strategy(backend, settings.max_entries, redis_client)?;
        info!("Cache backend initialized: {}", strategy.name());
        Ok(Self::new(strategy, CachePolicy::from_settings(settings)))
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// 获取并反序列化缓存值
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let strategy = self.strategy.read().await;
        let backend = strategy.name();
        match strategy.get(key).await? {
            Some(value) => {
                counter!("cache_hits_total", "backend" => backend).increment(1);
                Ok(Some(serde_json::from_value(value)?))
            }
            None => {
                counter!("cache_misses_total", "backend" => backend).increment(1);
                Ok(None)
            }
        }
    }

    /// 按策略 TTL 写入缓存
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let ttl = self.policy.ttl_for(key);
        self.set_with_ttl(key, value, ttl).await
    }

    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let value = serde_json::to_value(value)?;
        let strategy = self.strategy.read().await;
        strategy.set(key, value, ttl).await
    }

    /// 命中则返回缓存值，否则调用 `load` 加载并写入缓存
    ///
    /// 缓存读写失败时降级为直接加载
    pub async fn get_or_load<T, E, F, Fut>(&self, key: &str, load: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.get::<T>(key).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => warn!("Cache read failed for {}: {}", key, e),
        }

        let value = load().await?;
        if let Err(e) = self.set(key, &value).await {
            warn!("Cache write failed for {}: {}", key, e);
        }
        Ok(value)
    }

    /// 删除单个键
    pub async fn invalidate(&self, key: &str) {
        let strategy = self.strategy.read().await;
        if let Err(e) = strategy.delete(key).await {
            warn!("Cache invalidation failed for {}: {}", key, e);
        }
    }

    /// 删除前缀下的所有键
    pub async fn invalidate_prefix(&self, prefix: &str) -> u64 {
        let strategy = self.strategy.read().await;
        match strategy.invalidate_prefix(prefix).await {
            Ok(removed) => {
                counter!("cache_invalidations_total", "backend" => strategy.name())
                    .increment(removed);
                debug!("Invalidated {} cache entries under '{}'", removed, prefix);
                removed
            }
            Err(e) => {
                warn!("Cache prefix invalidation failed for {}: {}", prefix, e);
                0
            }
        }
    }

    /// 清空缓存
    pub async fn clear(&self) -> Result<(), CacheError> {
        let strategy = self.strategy.read().await;
        strategy.clear().await
    }

    /// 获取缓存统计信息
    pub async fn get_stats(&self) -> CacheStats {
        let strategy = self.strategy.read().await;
        strategy.get_stats()
    }

    /// 获取缓存命中率
    pub async fn get_hit_rate(&self) -> f64 {
        let stats = self.get_stats().await;
        let total_requests = stats.hits + stats.misses;

        if total_requests == 0 {
            0.0
        } else {
            stats.hits as f64 / total_requests as f64
        }
    }

    /// 切换缓存策略，旧策略中的数据被丢弃
    pub async fn switch_strategy(&self, new_strategy: Box<dyn CacheStrategy>) {
        info!("Switching cache strategy to: {}", new_strategy.name());
        let mut strategy = self.strategy.write().await;
        *strategy = new_strategy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::cache_strategy::MemoryCacheStrategy;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn memory_manager(policy: CachePolicy) -> CacheManager {
        CacheManager::new(Box::new(MemoryCacheStrategy::new(100)), policy)
    }

    #[test]
    fn test_type_defaults() {
        let policy = CachePolicy::new(Duration::from_secs(42));
        assert_eq!(policy.ttl_for("jobs:active"), Duration::from_secs(300));
        assert_eq!(policy.ttl_for("categories:all"), Duration::from_secs(1800));
        assert_eq!(policy.ttl_for("tags:all"), Duration::from_secs(1800));
        assert_eq!(policy.ttl_for("users:123"), Duration::from_secs(120));
        assert_eq!(policy.ttl_for("user_actions:123"), Duration::from_secs(60));
        assert_eq!(policy.ttl_for("stats:overview"), Duration::from_secs(60));
        assert_eq!(policy.ttl_for("something:else"), Duration::from_secs(42));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let policy = CachePolicy::new(Duration::from_secs(42))
            .with_override("jobs:detail:", Duration::from_secs(30))
            .with_override("jobs:", Duration::from_secs(600));

        assert_eq!(policy.ttl_for("jobs:detail:abc"), Duration::from_secs(30));
        assert_eq!(policy.ttl_for("jobs:active"), Duration::from_secs(600));
    }

    #[test]
    fn test_policy_from_settings() {
        let settings = CacheSettings {
            backend: "memory".to_string(),
            default_ttl_secs: 10,
            max_entries: 100,
            ttl_overrides: HashMap::from([("users:".to_string(), 5)]),
        };
        let policy = CachePolicy::from_settings(&settings);
        assert_eq!(policy.ttl_for("users:1"), Duration::from_secs(5));
        assert_eq!(policy.ttl_for("misc"), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_policy_ttl() {
        let manager = memory_manager(
            CachePolicy::new(Duration::from_secs(300)).with_override("stats:", Duration::from_secs(5)),
        );
        manager.set("stats:overview", &vec![1u32, 2]).await.unwrap();

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(
            manager.get::<Vec<u32>>("stats:overview").await.unwrap(),
            Some(vec![1, 2])
        );

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(manager.get::<Vec<u32>>("stats:overview").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_or_load_caches_value() {
        let manager = memory_manager(CachePolicy::new(Duration::from_secs(60)));
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<String, CacheError> = manager
                .get_or_load("tags:all", || async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok("loaded".to_string())
                })
                .await;
            assert_eq!(value.unwrap(), "loaded");
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        manager.invalidate_prefix("tags:").await;
        let _: Result<String, CacheError> = manager
            .get_or_load("tags:all", || async {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok("reloaded".to_string())
            })
            .await;
        assert_eq!(loads.load(Ordering::SeqCst), 2);
        assert!(manager.get_hit_rate().await > 0.0);
    }

    #[tokio::test]
    async fn test_load_errors_are_not_cached() {
        let manager = memory_manager(CachePolicy::new(Duration::from_secs(60)));
        let result: Result<u32, String> = manager
            .get_or_load("jobs:active", || async { Err("boom".to_string()) })
            .await;
        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(manager.get::<u32>("jobs:active").await.unwrap(), None);
    }
}
