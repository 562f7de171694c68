// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::infrastructure::cache::redis_client::RedisClient;
use crate::utils::errors::CacheError;

/// Redis 中所有缓存键的命名空间
const REDIS_NAMESPACE: &str = "campus_jobs:cache:";

/// 缓存后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// 内存缓存
    Memory,
    /// Redis缓存
    Redis,
}

impl FromStr for CacheBackend {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            other => Err(CacheError::Configuration(format!(
                "unknown cache backend: {}",
                other
            ))),
        }
    }
}

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub stores: u64,
    pub invalidations: u64,
}

/// 缓存条目
#[derive(Clone)]
struct CacheEntry {
    data: Value,
    expires_at: Instant,
    last_accessed: Instant,
}

impl CacheEntry {
    fn new(data: Value, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            data,
            expires_at: now + ttl,
            last_accessed: now,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// 缓存策略接口
///
/// 值统一以 JSON 存储，类型转换由 `CacheManager` 负责
#[async_trait]
pub trait CacheStrategy: Send + Sync {
    /// 获取缓存值，过期视为未命中
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// 设置缓存值
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError>;

    /// 删除缓存值
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// 删除所有以 `prefix` 开头的键，返回删除数量
    async fn invalidate_prefix(&self, prefix: &str) -> Result<u64, CacheError>;

    /// 清空缓存
    async fn clear(&self) -> Result<(), CacheError>;

    /// 获取缓存统计信息
    fn get_stats(&self) -> CacheStats;

    /// 后端名称，用于日志和指标标签
    fn name(&self) -> &'static str;
}

/// 内存缓存策略
pub struct MemoryCacheStrategy {
    cache: DashMap<String, CacheEntry>,
    max_entries: usize,
    stats: Mutex<CacheStats>,
}

impl MemoryCacheStrategy {
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: DashMap::new(),
            max_entries: max_entries.max(1),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// 超出容量时先清理过期条目，仍超出则淘汰最久未访问的条目
    fn evict_if_needed(&self) {
        if self.cache.len() <= self.max_entries {
            return;
        }

        let now = Instant::now();
        let before = self.cache.len();
        self.cache.retain(|_, entry| !entry.is_expired(now));

        let overflow = self.cache.len().saturating_sub(self.max_entries);
        if overflow > 0 {
            let mut entries: Vec<(String, Instant)> = self
                .cache
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().last_accessed))
                .collect();
            entries.sort_by_key(|(_, accessed)| *accessed);

            for (key, _) in entries.iter().take(overflow) {
                self.cache.remove(key);
            }
        }

        let evicted = before - self.cache.len();
        self.stats.lock().evictions += evicted as u64;
        debug!("Evicted {} entries from memory cache", evicted);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[async_trait]
impl CacheStrategy for MemoryCacheStrategy {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let now = Instant::now();
        if let Some(mut entry) = self.cache.get_mut(key) {
            if entry.is_expired(now) {
                drop(entry);
                self.cache.remove(key);
                self.stats.lock().misses += 1;
                return Ok(None);
            }

            entry.last_accessed = now;
            self.stats.lock().hits += 1;
            Ok(Some(entry.data.clone()))
        } else {
            self.stats.lock().misses += 1;
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError> {
        self.cache
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        self.evict_if_needed();

        self.stats.lock().stores += 1;
        debug!("Stored memory cache entry {} (ttl {:?})", key, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        if self.cache.remove(key).is_some() {
            self.stats.lock().invalidations += 1;
        }
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<u64, CacheError> {
        let before = self.cache.len();
        self.cache.retain(|key, _| !key.starts_with(prefix));
        let removed = (before - self.cache.len()) as u64;

        self.stats.lock().invalidations += removed;
        debug!("Invalidated {} memory cache entries under '{}'", removed, prefix);
        Ok(removed)
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.cache.clear();
        info!("Cleared all memory cache entries");
        Ok(())
    }

    fn get_stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Redis缓存策略
pub struct RedisCacheStrategy {
    redis_client: Arc<RedisClient>,
    stats: Mutex<CacheStats>,
}

impl RedisCacheStrategy {
    pub fn new(redis_client: Arc<RedisClient>) -> Self {
        Self {
            redis_client,
            stats: Mutex::new(CacheStats::default()),
        }
    }

    fn namespaced(key: &str) -> String {
        format!("{}{}", REDIS_NAMESPACE, key)
    }
}

#[async_trait]
impl CacheStrategy for RedisCacheStrategy {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        match self.redis_client.get(&Self::namespaced(key)).await? {
            Some(json_str) => {
                let value = serde_json::from_str(&json_str)?;
                self.stats.lock().hits += 1;
                debug!("Redis cache hit for key: {}", key);
                Ok(Some(value))
            }
            None => {
                self.stats.lock().misses += 1;
                debug!("Redis cache miss for key: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError> {
        let json_str = serde_json::to_string(&value)?;
        self.redis_client
            .set(&Self::namespaced(key), &json_str, ttl.as_secs())
            .await?;

        self.stats.lock().stores += 1;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.redis_client.delete(&Self::namespaced(key)).await?;
        self.stats.lock().invalidations += 1;
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<u64, CacheError> {
        let removed = self
            .redis_client
            .delete_prefix(&Self::namespaced(prefix))
            .await?;
        self.stats.lock().invalidations += removed;
        debug!("Invalidated {} Redis cache entries under '{}'", removed, prefix);
        Ok(removed)
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let removed = self.redis_client.delete_prefix(REDIS_NAMESPACE).await?;
        info!("Cleared {} Redis cache entries", removed);
        Ok(())
    }

    fn get_stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

/// 缓存策略工厂
pub struct CacheStrategyFactory;

impl CacheStrategyFactory {
    /// 按后端类型创建缓存策略
    pub fn create_strategy(
        backend: CacheBackend,
        max_entries: usize,
        redis_client: Option<Arc<RedisClient>>,
    ) -> Result<Box<dyn CacheStrategy>, CacheError> {
        match backend {
            CacheBackend::Memory => Ok(Box::new(MemoryCacheStrategy::new(max_entries))),
            CacheBackend::Redis => {
                let client = redis_client.ok_or_else(|| {
                    CacheError::Configuration(
                        "redis cache backend requires redis.url".to_string(),
                    )
                })?;
                Ok(Box::new(RedisCacheStrategy::new(client)))
            }
        }
    }
}
