// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// 应用程序配置设置
///
/// 包含数据库、Redis、服务器、缓存、会员、认证等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// Redis配置
    pub redis: RedisSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 缓存配置
    pub cache: CacheSettings,
    /// 会员等级配置
    pub membership: MembershipSettings,
    /// 认证配置
    pub auth: AuthSettings,
    /// 防重复提交配置
    pub submit_guard: SubmitGuardSettings,
    /// 后台工作器配置
    pub workers: WorkerSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// Redis配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis连接URL，仅当缓存后端为 redis 时需要
    pub url: Option<String>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 缓存配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// 缓存后端 (memory, redis)
    pub backend: String,
    /// 未匹配任何前缀时的默认 TTL（秒）
    pub default_ttl_secs: u64,
    /// 内存缓存最大条目数
    pub max_entries: usize,
    /// 按键前缀覆盖 TTL（秒），例如 `jobs: = 60`
    #[serde(default)]
    pub ttl_overrides: HashMap<String, u64>,
}

/// 会员等级配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipSettings {
    /// 普通用户每个分类可查看的岗位数
    pub common_view_limit: usize,
    /// 临时会员每个分类可查看的岗位数
    pub temp_view_limit: usize,
    /// 正式会员每个分类可查看的岗位数，为空表示不限
    pub official_view_limit: Option<usize>,
}

/// 认证配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// 会话有效期（小时）
    pub session_ttl_hours: i64,
    /// 初始管理员用户名
    pub bootstrap_admin_username: Option<String>,
    /// 初始管理员密码
    pub bootstrap_admin_password: Option<String>,
}

/// 防重复提交配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitGuardSettings {
    /// 同一操作的最小间隔（毫秒）
    pub window_ms: u64,
}

/// 后台工作器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerSettings {
    /// 会员过期扫描间隔（秒）
    pub membership_sweep_interval_secs: u64,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// Prometheus 监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `CAMPUS_JOBS__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::from_builder(
            Self::defaults()?
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name(&format!("config/{}", env)).required(false))
                .add_source(Environment::with_prefix("CAMPUS_JOBS").separator("__")),
        )
    }

    /// 从指定的配置文件加载（不读取环境变量），主要用于测试和命令行覆盖
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::from_builder(Self::defaults()?.add_source(File::with_name(path).required(true)))
    }

    /// 只使用内置默认值
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_builder(Self::defaults()?)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB pool settings
            .set_default("database.url", "postgres://localhost/campus_jobs")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Cache
            .set_default("cache.backend", "memory")?
            .set_default("cache.default_ttl_secs", 300)?
            .set_default("cache.max_entries", 10000)?
            // Membership
            .set_default("membership.common_view_limit", 5)?
            .set_default("membership.temp_view_limit", 20)?
            // Auth
            .set_default("auth.session_ttl_hours", 72)?
            // Submit guard
            .set_default("submit_guard.window_ms", 1500)?
            // Workers
            .set_default("workers.membership_sweep_interval_secs", 600)?
            // Metrics
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
