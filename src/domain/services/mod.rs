// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 分类规则（category_rules）：岗位分类/标签选择的约束校验
/// - CSV 导入（csv_import）：CSV 解析与岗位行校验
/// - CSV 导出（csv_export）：激活码与统计数据导出
/// - 会员服务（membership_service）：等级判定、兑换计算与查看额度
pub mod category_rules;
pub mod csv_export;
pub mod csv_import;
pub mod membership_service;
