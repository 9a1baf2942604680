// Common test utilities for integration tests

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use iotwatch_backend::AppData;

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates fully wired application data over an in-memory database
pub async fn setup_app_data() -> AppData {
    let db = setup_test_db().await;
    AppData::init(
        db,
        "test-secret-key-minimum-32-characters-long".to_string(),
        "test-pepper".to_string(),
    )
}
