// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use redis::{AsyncCommands, RedisResult};

/// 每次 SCAN 建议返回的键数量
const SCAN_BATCH: usize = 200;

/// Redis客户端
///
/// 提供对Redis数据库的异步操作接口
#[derive(Clone)]
pub struct RedisClient {
    /// Redis客户端
    client: redis::Client,
}

impl RedisClient {
    /// 创建新的Redis客户端实例
    ///
    /// # 参数
    ///
    /// * `redis_url` - Redis连接URL
    pub fn new(redis_url: &str) -> RedisResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// 获取指定键的值
    ///
    /// # 返回值
    ///
    /// * `Ok(Option<String>)` - 键对应的值，如果不存在则返回None
    pub async fn get(&self, key: &str) -> RedisResult<Option<String>> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.get(key).await
    }

    /// 设置键值对并指定过期时间（秒）
    pub async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> RedisResult<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.set_ex::<_, _, ()>(key, value, ttl_seconds.max(1)).await
    }

    /// 删除指定键
    pub async fn delete(&self, key: &str) -> RedisResult<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.del::<_, ()>(key).await
    }

    /// 删除所有以 `prefix` 开头的键，返回删除数量
    ///
    /// 使用 `SCAN MATCH` 分批遍历，避免 `KEYS` 阻塞服务器
    pub async fn delete_prefix(&self, prefix: &str) -> RedisResult<u64> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let pattern = format!("{}*", escape_glob(prefix));
        let mut cursor: u64 = 0;
        let mut deleted: u64 = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut con)
                .await?;

            if !keys.is_empty() {
                let removed: u64 = con.del(&keys).await?;
                deleted += removed;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(deleted)
    }

    /// 检查连接是否可用
    pub async fn ping(&self) -> RedisResult<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut con).await?;
        Ok(())
    }
}

/// 转义 glob 特殊字符，保证前缀按字面匹配
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
