// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_catalog;
mod m20260301_000002_create_accounts;
mod m20260301_000003_create_activation_codes;
mod m20260301_000004_create_user_activity;
mod m20260302_000001_create_indexes;

/// 数据库迁移器
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// 获取所有迁移
    ///
    /// # 返回值
    ///
    /// 返回按执行顺序排列的迁移列表
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_catalog::Migration),
            Box::new(m20260301_000002_create_accounts::Migration),
            Box::new(m20260301_000003_create_activation_codes::Migration),
            Box::new(m20260301_000004_create_user_activity::Migration),
            Box::new(m20260302_000001_create_indexes::Migration),
        ]
    }
}
