// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::MembershipTier;

/// 激活码字符集，去掉了易混淆的 0/O/1/I/L
pub const CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKMNPQRSTUVWXYZ";
/// 激活码长度
pub const CODE_LENGTH: usize = 12;

/// 一次性激活码
///
/// 用户兑换后获得 `tier` 等级的会员，有效期 `validity_days` 天
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationCode {
    pub id: Uuid,
    pub code: String,
    pub tier: MembershipTier,
    /// 有效天数，必须大于 0
    pub validity_days: i32,
    pub is_used: bool,
    pub used_by: Option<Uuid>,
    pub used_at: Option<DateTime<Utc>>,
    /// 批次备注
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ActivationCode {
    /// 生成一个未使用的激活码
    pub fn generate(tier: MembershipTier, validity_days: i32, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: generate_code(),
            tier,
            validity_days,
            is_used: false,
            used_by: None,
            used_at: None,
            note,
            created_at: Utc::now(),
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_used {
            "used"
        } else {
            "unused"
        }
    }
}

/// 激活码列表过滤条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CodeFilter {
    #[default]
    All,
    Used,
    Unused,
}

/// 生成随机激活码
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// 规范化用户输入的激活码：去空白、去连字符、转大写
pub fn normalize_code(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" abcd-efgh-2345 "), "ABCDEFGH2345");
    }
}
