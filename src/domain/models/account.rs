// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 用户端账号
///
/// 密码哈希单独存放在 [`UserCredentials`] 中，避免被序列化返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// 登录名（通常为学号），全局唯一
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    /// 已记录的会员等级，是否仍有效需结合过期时间判断
    pub tier: MembershipTier,
    /// 会员过期时间
    pub membership_expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, display_name: String, email: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            display_name,
            email,
            tier: MembershipTier::Common,
            membership_expires_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 登录校验所需的账号信息
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// 管理端账号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// 管理员登录校验所需的信息
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub admin: Admin,
    pub password_hash: String,
}

/// 会员等级
///
/// 等级越高，每个分类下可查看的岗位越多
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    #[default]
    Common,
    Temp,
    Official,
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipTier::Common => write!(f, "common"),
            MembershipTier::Temp => write!(f, "temp"),
            MembershipTier::Official => write!(f, "official"),
        }
    }
}

impl FromStr for MembershipTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "common" | "普通" => Ok(MembershipTier::Common),
            "temp" | "临时" => Ok(MembershipTier::Temp),
            "official" | "正式" => Ok(MembershipTier::Official),
            other => Err(format!("invalid membership tier: {}", other)),
        }
    }
}

/// 会话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// 登录会话
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// 随机令牌（64 位十六进制）
    pub token: String,
    /// 用户或管理员 ID
    pub subject_id: Uuid,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// 生成新的会话令牌
    pub fn issue(subject_id: Uuid, role: Role, ttl: chrono::Duration) -> Self {
        let now = Utc::now();
        Self {
            token: hex::encode(rand::random::<[u8; 32]>()),
            subject_id,
            role,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
