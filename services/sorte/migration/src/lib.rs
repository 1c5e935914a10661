use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users;
mod m20261001_000002_create_campaigns;
mod m20261001_000003_create_campaign_prizes;
mod m20261001_000004_create_positions;
mod m20261001_000005_create_codes;
mod m20261001_000006_create_winners;
mod m20261001_000007_create_vouchers;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users::Migration),
            Box::new(m20261001_000002_create_campaigns::Migration),
            Box::new(m20261001_000003_create_campaign_prizes::Migration),
            Box::new(m20261001_000004_create_positions::Migration),
            Box::new(m20261001_000005_create_codes::Migration),
            Box::new(m20261001_000006_create_winners::Migration),
            Box::new(m20261001_000007_create_vouchers::Migration),
        ]
    }
}
