// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了招聘平台的核心业务实体，包括：
/// - 岗位（job）：企业发布的招聘信息
/// - 分类（category）与标签（tag）：岗位的组织维度
/// - 用户（user）、管理员与会话（account）：两个门户的账号体系
/// - 激活码（activation_code）：兑换会员等级的一次性凭证
/// - 用户行为（user_action）与投递进度（job_state）
/// - 数据变更事件（change_event）：实时通知的载体
pub mod account;
pub mod activation_code;
pub mod category;
pub mod change_event;
pub mod job;
pub mod job_state;
pub mod statistics;
pub mod tag;
pub mod user_action;
