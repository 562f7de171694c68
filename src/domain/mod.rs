// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：岗位、分类、账号、激活码等业务实体
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 服务（services）：会员计算、分类规则、CSV 解析与导出等纯业务规则
///
/// 领域层不依赖于具体的存储、缓存或 HTTP 实现。
pub mod models;
pub mod repositories;
pub mod services;
