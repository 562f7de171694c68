// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::job_state::ApplicationStage;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct JobStateRequestDto {
    pub stage: ApplicationStage,
    #[validate(length(max = 500, message = "note must be at most 500 characters"))]
    pub note: Option<String>,
}
