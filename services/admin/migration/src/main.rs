use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(corporate_admin_migration::Migrator).await;
}
