// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口的 SeaORM 实现
pub mod account_repo_impl;
pub mod activation_code_repo_impl;
pub mod category_repo_impl;
pub mod job_repo_impl;
pub mod job_state_repo_impl;
pub mod support;
pub mod tag_repo_impl;
pub mod user_action_repo_impl;

#[cfg(test)]
mod tests;
