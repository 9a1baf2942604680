mod api;
mod app_data;
mod config;
mod errors;
mod services;
mod stores;
mod types;

use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use api::{AlertsApi, AuthApi, DeviceAccessApi, DevicesApi, HealthApi};
use app_data::AppData;
use config::Settings;
use errors::internal::CredentialError;
use errors::InternalError;
use migration::{Migrator, MigratorTrait};
use types::internal::auth::UserRole;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    config::init_logging().expect("Failed to initialize logging");

    let settings = Settings::from_env().expect("Invalid configuration");

    // Connect to database
    let db: DatabaseConnection = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database: {}", settings.database_url);

    // Run migrations
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    let app_data = AppData::init(db, settings.jwt_secret, settings.password_pepper);

    // Seed the bootstrap admin on fresh installs
    if let Some((username, password)) = settings.bootstrap_admin {
        match app_data
            .credential_store
            .add_user(username.clone(), password, UserRole::Admin)
            .await
        {
            Ok(user_id) => {
                tracing::info!("Bootstrap admin '{}' created with id {}", username, user_id);
            }
            Err(InternalError::Credential(CredentialError::DuplicateUsername(_))) => {
                tracing::debug!("Bootstrap admin '{}' already exists, skipping", username);
            }
            Err(e) => {
                tracing::error!("Failed to create bootstrap admin: {}", e);
            }
        }
    }

    let auth_api = AuthApi::new(
        app_data.credential_store.clone(),
        app_data.token_service.clone(),
    );
    let devices_api = DevicesApi::new(
        app_data.device_store.clone(),
        app_data.device_log_store.clone(),
        app_data.token_service.clone(),
    );
    let device_access_api = DeviceAccessApi::new(
        app_data.access_service.clone(),
        app_data.token_service.clone(),
    );
    let alerts_api = AlertsApi::new(
        app_data.alert_store.clone(),
        app_data.attempt_store.clone(),
        app_data.token_service.clone(),
    );

    let api_service = OpenApiService::new(
        (HealthApi, auth_api, devices_api, device_access_api, alerts_api),
        "IoTWatch Backend",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", settings.bind_addr));

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", settings.bind_addr);
    Server::new(TcpListener::bind(settings.bind_addr))
        .run(app)
        .await
}
