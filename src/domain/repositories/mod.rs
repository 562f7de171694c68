// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 岗位仓库（job_repository）：岗位的增删改查与浏览计数
/// - 分类仓库（category_repository）与标签仓库（tag_repository）
/// - 账号仓库（account_repository）：用户、管理员与会话
/// - 激活码仓库（activation_code_repository）：一次性激活码
/// - 用户行为仓库（user_action_repository）：收藏与投递记录
/// - 投递进度仓库（job_state_repository）
pub mod account_repository;
pub mod activation_code_repository;
pub mod category_repository;
pub mod job_repository;
pub mod job_state_repository;
pub mod tag_repository;
pub mod user_action_repository;
