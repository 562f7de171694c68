// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::models::account::MembershipTier;
use crate::domain::models::activation_code::CodeFilter;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RedeemRequestDto {
    #[validate(length(min = 1, max = 64, message = "code is required"))]
    pub code: String,
}

/// 批量生成激活码
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct GenerateCodesDto {
    #[validate(range(min = 1, max = 500, message = "count must be between 1 and 500"))]
    pub count: u32,
    #[validate(custom(function = "validate_code_tier"))]
    pub tier: MembershipTier,
    #[validate(range(
        min = 1,
        max = 36500,
        message = "validity_days must be between 1 and 36500"
    ))]
    pub validity_days: i32,
    #[validate(length(max = 200))]
    pub note: Option<String>,
}

fn validate_code_tier(tier: &MembershipTier) -> Result<(), ValidationError> {
    if *tier == MembershipTier::Common {
        let mut err = ValidationError::new("tier");
        err.message = Some("activation codes grant temp or official membership".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CodeListQuery {
    #[serde(default)]
    pub status: CodeFilter,
}
