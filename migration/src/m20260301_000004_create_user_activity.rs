use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per user holding favorited / applied job id arrays
        manager
            .create_table(
                Table::create()
                    .table(UserActions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserActions::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserActions::FavoritedJobIds)
                            .json()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserActions::AppliedJobIds).json().not_null())
                    .col(
                        ColumnDef::new(UserActions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per user holding the application pipeline entries
        manager
            .create_table(
                Table::create()
                    .table(JobStates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobStates::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JobStates::Entries).json().not_null())
                    .col(
                        ColumnDef::new(JobStates::UpdatedAt)
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
            .drop_table(Table::drop().table(JobStates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserActions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserActions {
    Table,
    UserId,
    FavoritedJobIds,
    AppliedJobIds,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JobStates {
    Table,
    UserId,
    Entries,
    UpdatedAt,
}
