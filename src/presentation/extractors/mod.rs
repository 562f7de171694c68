// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 请求提取器模块
///
/// 从认证中间件写入的上下文中提取当前用户或管理员
pub mod auth;
