// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-.@]+$").expect("valid username regex"));

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RegisterRequestDto {
    #[validate(
        length(min = 3, max = 32, message = "username must be 3-32 characters"),
        regex(path = *USERNAME_PATTERN, message = "username contains invalid characters")
    )]
    pub username: String,
    #[validate(length(min = 6, max = 128, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(max = 64))]
    pub display_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}
