use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessTokens::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccessTokens::AdminId).uuid().not_null())
                    .col(ColumnDef::new(AccessTokens::Name).string().not_null())
                    .col(
                        ColumnDef::new(AccessTokens::TokenHash)
                            .binary()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AccessTokens::LastUsedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(AccessTokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AccessTokens::Table, AccessTokens::AdminId)
                            .to(Admins::Table, Admins::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Logout deletes by admin_id.
        manager
            .create_index(
                Index::create()
                    .table(AccessTokens::Table)
                    .col(AccessTokens::AdminId)
                    .name("idx_access_tokens_admin_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessTokens::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AccessTokens {
    Table,
    Id,
    AdminId,
    Name,
    TokenHash,
    LastUsedAt,
    CreatedAt,
}

#[derive(Iden)]
enum Admins {
    Table,
    Id,
}
