// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::category::CategoryKind;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CategoryRequestDto {
    #[validate(length(min = 1, max = 32, message = "name must be 1-32 characters"))]
    pub name: String,
    pub kind: CategoryKind,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TagRequestDto {
    #[validate(length(min = 1, max = 32, message = "name must be 1-32 characters"))]
    pub name: String,
}
