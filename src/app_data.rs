use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::services::{
    AccessService, PermissionResolver, SecurityRecorder, SessionTracker, TokenService,
};
use crate::stores::{AlertStore, AttemptStore, CredentialStore, DeviceLogStore, DeviceStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across API
/// surfaces. This keeps store construction in one place and gives the API
/// constructors stable signatures.
pub struct AppData {
    pub db: DatabaseConnection,
    pub credential_store: Arc<CredentialStore>,
    pub device_store: Arc<DeviceStore>,
    pub alert_store: Arc<AlertStore>,
    pub attempt_store: Arc<AttemptStore>,
    pub device_log_store: Arc<DeviceLogStore>,
    pub token_service: Arc<TokenService>,
    pub session_tracker: Arc<SessionTracker>,
    pub access_service: Arc<AccessService>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database must be connected and migrated before calling this.
    /// Stores are created first; the recorder and the access engine are
    /// wired on top of them.
    pub fn init(db: DatabaseConnection, jwt_secret: String, password_pepper: String) -> Self {
        tracing::info!("Initializing AppData...");

        let credential_store = Arc::new(CredentialStore::new(db.clone(), password_pepper));
        let device_store = Arc::new(DeviceStore::new(db.clone()));
        let alert_store = Arc::new(AlertStore::new(db.clone()));
        let attempt_store = Arc::new(AttemptStore::new(db.clone()));
        let device_log_store = Arc::new(DeviceLogStore::new(db.clone()));

        let token_service = Arc::new(TokenService::new(jwt_secret));
        let session_tracker = Arc::new(SessionTracker::new());

        let recorder = Arc::new(SecurityRecorder::new(
            attempt_store.clone(),
            alert_store.clone(),
            device_log_store.clone(),
        ));
        let permission_resolver = Arc::new(PermissionResolver::new(credential_store.clone()));

        let access_service = Arc::new(AccessService::new(
            device_store.clone(),
            permission_resolver,
            recorder,
            session_tracker.clone(),
        ));

        tracing::info!("AppData initialization complete");

        Self {
            db,
            credential_store,
            device_store,
            alert_store,
            attempt_store,
            device_log_store,
            token_service,
            session_tracker,
            access_service,
        }
    }
}
