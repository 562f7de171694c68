// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// 提供HTTP请求处理的中间件功能
/// 包括会话认证、防重复提交、请求指标
pub mod auth_middleware;
pub mod metrics_middleware;
pub mod submit_guard;
pub mod submit_guard_middleware;
