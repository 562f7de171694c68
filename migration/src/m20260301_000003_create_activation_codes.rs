use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivationCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivationCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActivationCodes::Code)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ActivationCodes::Tier)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivationCodes::ValidityDays)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivationCodes::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ActivationCodes::UsedBy).uuid().null())
                    .col(
                        ColumnDef::new(ActivationCodes::UsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(ActivationCodes::Note).string().null())
                    .col(
                        ColumnDef::new(ActivationCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivationCodes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActivationCodes {
    Table,
    Id,
    Code,
    Tier,
    ValidityDays,
    IsUsed,
    UsedBy,
    UsedAt,
    Note,
    CreatedAt,
}
