use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Keyed by email so a new login replaces the previous passcode.
        manager
            .create_table(
                Table::create()
                    .table(OneTimePasscodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OneTimePasscodes::Email)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OneTimePasscodes::Code).string_len(6).not_null())
                    .col(
                        ColumnDef::new(OneTimePasscodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OneTimePasscodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OneTimePasscodes {
    Table,
    Email,
    Code,
    CreatedAt,
}
