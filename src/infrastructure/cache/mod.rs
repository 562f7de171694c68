// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 内存与 Redis 两种后端，按键前缀决定过期时间
pub mod cache_manager;
pub mod cache_strategy;
pub mod redis_client;
