// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 后台定时任务：会员过期降级与过期会话清理
pub mod membership_expiry_worker;

pub use membership_expiry_worker::MembershipExpiryWorker;
