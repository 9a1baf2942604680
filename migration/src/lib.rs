pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_auth_schema;
mod m20250301_000002_create_device_schema;
mod m20250301_000003_create_security_schema;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_auth_schema::Migration),
            Box::new(m20250301_000002_create_device_schema::Migration),
            Box::new(m20250301_000003_create_security_schema::Migration),
        ]
    }
}
