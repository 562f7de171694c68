// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::{MembershipTier, Role};
use crate::domain::models::category::CategoryKind;
use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text", enum_name = "membership_tier")]
pub enum SeaMembershipTier {
    #[sea_orm(string_value = "common")]
    Common,
    #[sea_orm(string_value = "temp")]
    Temp,
    #[sea_orm(string_value = "official")]
    Official,
}

impl From<MembershipTier> for SeaMembershipTier {
    fn from(tier: MembershipTier) -> Self {
        match tier {
            MembershipTier::Common => SeaMembershipTier::Common,
            MembershipTier::Temp => SeaMembershipTier::Temp,
            MembershipTier::Official => SeaMembershipTier::Official,
        }
    }
}

impl From<SeaMembershipTier> for MembershipTier {
    fn from(tier: SeaMembershipTier) -> Self {
        match tier {
            SeaMembershipTier::Common => MembershipTier::Common,
            SeaMembershipTier::Temp => MembershipTier::Temp,
            SeaMembershipTier::Official => MembershipTier::Official,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text", enum_name = "category_kind")]
pub enum SeaCategoryKind {
    #[sea_orm(string_value = "nature")]
    Nature,
    #[sea_orm(string_value = "other")]
    Other,
}

impl From<CategoryKind> for SeaCategoryKind {
    fn from(kind: CategoryKind) -> Self {
        match kind {
            CategoryKind::Nature => SeaCategoryKind::Nature,
            CategoryKind::Other => SeaCategoryKind::Other,
        }
    }
}

impl From<SeaCategoryKind> for CategoryKind {
    fn from(kind: SeaCategoryKind) -> Self {
        match kind {
            SeaCategoryKind::Nature => CategoryKind::Nature,
            SeaCategoryKind::Other => CategoryKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text", enum_name = "session_role")]
pub enum SeaRole {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl From<Role> for SeaRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => SeaRole::User,
            Role::Admin => SeaRole::Admin,
        }
    }
}

impl From<SeaRole> for Role {
    fn from(role: SeaRole) -> Self {
        match role {
            SeaRole::User => Role::User,
            SeaRole::Admin => Role::Admin,
        }
    }
}
