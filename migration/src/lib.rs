pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_worker_table;
mod m20260301_000002_create_license_type_table;
mod m20260301_000003_create_license_table;
mod m20260301_000004_create_worker_required_license_type_table;
mod m20260301_000005_create_alert_setting_table;
mod m20260301_000006_create_alert_log_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_worker_table::Migration),
            Box::new(m20260301_000002_create_license_type_table::Migration),
            Box::new(m20260301_000003_create_license_table::Migration),
            Box::new(m20260301_000004_create_worker_required_license_type_table::Migration),
            Box::new(m20260301_000005_create_alert_setting_table::Migration),
            Box::new(m20260301_000006_create_alert_log_table::Migration),
        ]
    }
}
