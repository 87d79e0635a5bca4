pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_admins;
mod m20260301_000002_create_one_time_passcodes;
mod m20260301_000003_create_access_tokens;
mod m20260301_000004_create_events;
mod m20260301_000005_create_announcements;
mod m20260301_000006_create_members;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_admins::Migration),
            Box::new(m20260301_000002_create_one_time_passcodes::Migration),
            Box::new(m20260301_000003_create_access_tokens::Migration),
            Box::new(m20260301_000004_create_events::Migration),
            Box::new(m20260301_000005_create_announcements::Migration),
            Box::new(m20260301_000006_create_members::Migration),
        ]
    }
}
