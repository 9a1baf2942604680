use serde_json::json;
use std::net::IpAddr;
use std::sync::Arc;
use thiserror::Error;

use crate::errors::InternalError;
use crate::services::{PermissionResolver, SecurityRecorder, SessionTracker};
use crate::stores::DeviceStore;
use crate::types::db::device;
use crate::types::internal::security::{AttemptType, DeviceStatus, Severity};
use crate::types::internal::session::SessionConnection;

/// Why a connect request was refused
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("device id is not a positive integer")]
    InvalidDeviceId,

    #[error("device not found")]
    DeviceNotFound,

    #[error("device is not online")]
    DeviceOffline,

    #[error("no permission for security-enabled device")]
    AccessDenied,

    #[error(transparent)]
    Storage(#[from] InternalError),
}

/// Why a disconnect request was refused
#[derive(Error, Debug)]
pub enum DisconnectError {
    #[error("device id is not a positive integer")]
    InvalidDeviceId,

    #[error("no active connection to this device")]
    NotConnected,
}

/// The access decision engine.
///
/// Decides the outcome of a connect request for a (user, device) pair and
/// performs the required side effects in order: validate, decide, record,
/// mutate session state. Audit writes are best-effort and never change an
/// outcome the decision table has already produced; lookup failures abort
/// the request instead.
pub struct AccessService {
    device_store: Arc<DeviceStore>,
    permission_resolver: Arc<PermissionResolver>,
    recorder: Arc<SecurityRecorder>,
    session_tracker: Arc<SessionTracker>,
}

impl AccessService {
    pub fn new(
        device_store: Arc<DeviceStore>,
        permission_resolver: Arc<PermissionResolver>,
        recorder: Arc<SecurityRecorder>,
        session_tracker: Arc<SessionTracker>,
    ) -> Self {
        Self {
            device_store,
            permission_resolver,
            recorder,
            session_tracker,
        }
    }

    fn parse_device_id(raw: &str) -> Option<i32> {
        raw.trim().parse::<i32>().ok().filter(|id| *id > 0)
    }

    /// Evaluate a connect request. First matching rule wins:
    ///
    /// 1. malformed id -> InvalidDeviceId, no audit record
    /// 2. unknown device -> invalid_device attempt, DeviceNotFound
    /// 3. device not online -> offline_device attempt, DeviceOffline
    /// 4. no permission + security-enabled -> unauthorized_access attempt,
    ///    AccessDenied
    /// 5. no permission + unsecured -> medium security alert, then allow
    /// 6. allowed -> session connection snapshot + device log
    pub async fn connect(
        &self,
        user_id: &str,
        raw_device_id: &str,
        source_ip: Option<IpAddr>,
        user_agent: Option<String>,
    ) -> Result<device::Model, ConnectError> {
        let device_id =
            Self::parse_device_id(raw_device_id).ok_or(ConnectError::InvalidDeviceId)?;
        let source_ip_str = source_ip.map(|ip| ip.to_string());

        let device = self
            .device_store
            .find_by_id(device_id)
            .await
            .map_err(|e| {
                tracing::error!(user_id, device_id, ?source_ip_str, "Device lookup failed: {}", e);
                ConnectError::Storage(e)
            })?;

        let device = match device {
            Some(d) => d,
            None => {
                tracing::warn!(user_id, device_id, "Connect attempt to unknown device");
                self.recorder
                    .record_blocked_attempt(
                        user_id,
                        source_ip_str,
                        Some(device_id),
                        AttemptType::InvalidDevice,
                        "device_not_found",
                        user_agent,
                        serde_json::Map::new(),
                    )
                    .await;
                return Err(ConnectError::DeviceNotFound);
            }
        };

        if DeviceStatus::parse(&device.status) != DeviceStatus::Online {
            tracing::warn!(
                user_id,
                device_id,
                status = %device.status,
                "Connect attempt to non-online device"
            );
            let mut details = serde_json::Map::new();
            details.insert("device_name".to_string(), json!(device.name));
            details.insert("device_status".to_string(), json!(device.status));
            self.recorder
                .record_blocked_attempt(
                    user_id,
                    source_ip_str,
                    Some(device_id),
                    AttemptType::OfflineDevice,
                    "device_offline",
                    user_agent,
                    details,
                )
                .await;
            return Err(ConnectError::DeviceOffline);
        }

        let security_enabled = device
            .firmware_version
            .as_deref()
            .is_some_and(|v| !v.is_empty());

        // Fail closed: a resolver error reads as "no permission"
        let permitted = match self
            .permission_resolver
            .has_permission(user_id, device_id)
            .await
        {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(user_id, device_id, "Permission lookup failed: {}", e);
                false
            }
        };

        if !permitted && security_enabled {
            tracing::warn!(user_id, device_id, "Denied access to security-enabled device");
            let mut details = serde_json::Map::new();
            details.insert("device_name".to_string(), json!(device.name));
            details.insert("security_enabled".to_string(), json!(true));
            self.recorder
                .record_blocked_attempt(
                    user_id,
                    source_ip_str,
                    Some(device_id),
                    AttemptType::UnauthorizedAccess,
                    "no_permission_secured_device",
                    user_agent,
                    details,
                )
                .await;
            return Err(ConnectError::AccessDenied);
        }

        if !permitted {
            // Unsecured device: access is granted, the alert is the recorded
            // consequence rather than a block
            tracing::info!(user_id, device_id, "Unsecured device accessed without permission");
            self.recorder
                .record_security_alert(
                    Some(device_id),
                    "Unauthorized Device Access",
                    Severity::Medium,
                    format!(
                        "User {} connected to unsecured device '{}' without explicit permission",
                        user_id, device.name
                    ),
                    source_ip_str.clone(),
                    json!({
                        "reason": "unsecured_device_access",
                        "device_name": device.name,
                        "security_enabled": false,
                        "user_id": user_id,
                    }),
                )
                .await;
        }

        let connected_at = chrono::Utc::now().timestamp();
        self.session_tracker
            .set(user_id, SessionConnection::from_device(&device, connected_at));

        self.recorder
            .record_device_log(
                device_id,
                Some(user_id.to_string()),
                "device_connected",
                json!({
                    "device_name": device.name,
                    "source_ip": source_ip_str,
                }),
            )
            .await;

        tracing::info!(user_id, device_id, "Device connected");
        Ok(device)
    }

    /// Tear down the session's connection to a device.
    ///
    /// Requires an existing tracked connection whose device id matches.
    /// No relational state changes beyond a best-effort device log row.
    pub async fn disconnect(
        &self,
        user_id: &str,
        raw_device_id: &str,
    ) -> Result<SessionConnection, DisconnectError> {
        let device_id =
            Self::parse_device_id(raw_device_id).ok_or(DisconnectError::InvalidDeviceId)?;

        match self.session_tracker.get(user_id) {
            Some(conn) if conn.device_id == device_id => {}
            _ => return Err(DisconnectError::NotConnected),
        }

        let conn = self
            .session_tracker
            .clear(user_id)
            .ok_or(DisconnectError::NotConnected)?;

        self.recorder
            .record_device_log(
                device_id,
                Some(user_id.to_string()),
                "device_disconnected",
                json!({"device_name": conn.device_name}),
            )
            .await;

        tracing::info!(user_id, device_id, "Device disconnected");
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::device_store::NewDevice;
    use crate::stores::{AlertStore, AttemptStore, CredentialStore, DeviceLogStore};
    use crate::types::internal::auth::UserRole;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    struct Fixture {
        service: AccessService,
        device_store: Arc<DeviceStore>,
        attempt_store: Arc<AttemptStore>,
        alert_store: Arc<AlertStore>,
        tracker: Arc<SessionTracker>,
        admin_id: String,
        user_id: String,
    }

    async fn setup() -> Fixture {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let credential_store = Arc::new(CredentialStore::new(db.clone(), "test-pepper".into()));
        let device_store = Arc::new(DeviceStore::new(db.clone()));
        let attempt_store = Arc::new(AttemptStore::new(db.clone()));
        let alert_store = Arc::new(AlertStore::new(db.clone()));
        let device_log_store = Arc::new(DeviceLogStore::new(db.clone()));

        let recorder = Arc::new(SecurityRecorder::new(
            attempt_store.clone(),
            alert_store.clone(),
            device_log_store.clone(),
        ));
        let resolver = Arc::new(PermissionResolver::new(credential_store.clone()));
        let tracker = Arc::new(SessionTracker::new());

        let admin_id = credential_store
            .add_user("root".into(), "pw".into(), UserRole::Admin)
            .await
            .unwrap();
        let user_id = credential_store
            .add_user("joe".into(), "pw".into(), UserRole::User)
            .await
            .unwrap();

        let service = AccessService::new(
            device_store.clone(),
            resolver,
            recorder,
            tracker.clone(),
        );

        Fixture {
            service,
            device_store,
            attempt_store,
            alert_store,
            tracker,
            admin_id,
            user_id,
        }
    }

    async fn online_device(fx: &Fixture, name: &str, firmware: Option<&str>) -> device::Model {
        let device = fx
            .device_store
            .register(NewDevice {
                name: name.to_string(),
                device_type: "camera".to_string(),
                mac_address: None,
                ip_address: None,
                location: "lab".to_string(),
                firmware_version: firmware.map(str::to_string),
            })
            .await
            .unwrap();
        fx.device_store
            .set_status(device.id, DeviceStatus::Online)
            .await
            .unwrap()
    }

    fn ip() -> Option<IpAddr> {
        Some("192.0.2.10".parse().unwrap())
    }

    #[tokio::test]
    async fn test_malformed_device_id_rejected_without_audit() {
        let fx = setup().await;

        for raw in ["abc", "-3", "0", ""] {
            let result = fx.service.connect(&fx.admin_id, raw, ip(), None).await;
            assert!(matches!(result, Err(ConnectError::InvalidDeviceId)), "raw={:?}", raw);
        }

        assert_eq!(fx.attempt_store.count().await.unwrap(), 0);
        assert!(fx.alert_store.list(None, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_device_records_invalid_device_attempt() {
        let fx = setup().await;

        let result = fx.service.connect(&fx.admin_id, "999", ip(), None).await;
        assert!(matches!(result, Err(ConnectError::DeviceNotFound)));

        let attempts = fx.attempt_store.list(10).await.unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].attempt_type, "invalid_device");
        assert_eq!(attempts[0].target_device_id, Some(999));

        let details: serde_json::Value =
            serde_json::from_str(&attempts[0].request_details).unwrap();
        assert_eq!(details["user_id"], fx.admin_id.as_str());
        assert_eq!(details["blocked_reason"], "device_not_found");
    }

    #[tokio::test]
    async fn test_offline_device_records_offline_attempt() {
        let fx = setup().await;
        // Freshly registered devices start offline
        let device = fx
            .device_store
            .register(NewDevice {
                name: "cam-1".into(),
                device_type: "camera".into(),
                mac_address: None,
                ip_address: None,
                location: "lab".into(),
                firmware_version: Some("1.0".into()),
            })
            .await
            .unwrap();

        let result = fx
            .service
            .connect(&fx.admin_id, &device.id.to_string(), ip(), None)
            .await;
        assert!(matches!(result, Err(ConnectError::DeviceOffline)));

        let attempts = fx.attempt_store.list(10).await.unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].attempt_type, "offline_device");

        let details: serde_json::Value =
            serde_json::from_str(&attempts[0].request_details).unwrap();
        assert_eq!(details["blocked_reason"], "device_offline");
        assert_eq!(details["device_status"], "offline");
    }

    #[tokio::test]
    async fn test_alert_status_device_is_not_connectable() {
        let fx = setup().await;
        let device = online_device(&fx, "cam-1", Some("1.0")).await;
        fx.device_store
            .set_status(device.id, DeviceStatus::Alert)
            .await
            .unwrap();

        let result = fx
            .service
            .connect(&fx.admin_id, &device.id.to_string(), ip(), None)
            .await;
        assert!(matches!(result, Err(ConnectError::DeviceOffline)));

        let attempts = fx.attempt_store.list(10).await.unwrap();
        assert_eq!(attempts[0].attempt_type, "offline_device");
        let details: serde_json::Value =
            serde_json::from_str(&attempts[0].request_details).unwrap();
        assert_eq!(details["device_status"], "alert");
    }

    #[tokio::test]
    async fn test_admin_connects_without_audit_records() {
        let fx = setup().await;
        let device = online_device(&fx, "cam-1", Some("1.0")).await;

        let connected = fx
            .service
            .connect(&fx.admin_id, &device.id.to_string(), ip(), None)
            .await
            .expect("admin connect should succeed");
        assert_eq!(connected.id, device.id);

        assert_eq!(fx.attempt_store.count().await.unwrap(), 0);
        assert!(fx.alert_store.list(None, 10).await.unwrap().is_empty());

        let conn = fx.tracker.get(&fx.admin_id).expect("connection tracked");
        assert_eq!(conn.device_id, device.id);
        assert_eq!(conn.device_name, "cam-1");
    }

    #[tokio::test]
    async fn test_non_admin_denied_on_secured_device() {
        let fx = setup().await;
        let device = online_device(&fx, "cam-1", Some("1.0")).await;

        let result = fx
            .service
            .connect(&fx.user_id, &device.id.to_string(), ip(), Some("curl/8.0".into()))
            .await;
        assert!(matches!(result, Err(ConnectError::AccessDenied)));

        let attempts = fx.attempt_store.list(10).await.unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].attempt_type, "unauthorized_access");
        assert_eq!(attempts[0].attempt_count, 1);
        assert_eq!(attempts[0].user_agent.as_deref(), Some("curl/8.0"));

        let details: serde_json::Value =
            serde_json::from_str(&attempts[0].request_details).unwrap();
        assert_eq!(details["blocked_reason"], "no_permission_secured_device");
        assert_eq!(details["security_enabled"], true);

        // No session established, no alert raised
        assert!(fx.tracker.get(&fx.user_id).is_none());
        assert!(fx.alert_store.list(None, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_admin_allowed_on_unsecured_device_with_alert() {
        let fx = setup().await;
        // Empty firmware version means the device enforces no access control
        let device = online_device(&fx, "thermo-1", Some("")).await;

        let connected = fx
            .service
            .connect(&fx.user_id, &device.id.to_string(), ip(), None)
            .await
            .expect("unsecured connect should succeed");
        assert_eq!(connected.id, device.id);

        let alerts = fx.alert_store.list(None, 10).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, "medium");
        assert_eq!(alerts[0].status, "active");
        assert_eq!(alerts[0].alert_type, "Unauthorized Device Access");
        assert_eq!(alerts[0].device_id, Some(device.id));

        let metadata: serde_json::Value = serde_json::from_str(&alerts[0].metadata).unwrap();
        assert_eq!(metadata["reason"], "unsecured_device_access");
        assert_eq!(metadata["security_enabled"], false);

        // Blocked attempts stay empty; the session now holds the device
        assert_eq!(fx.attempt_store.count().await.unwrap(), 0);
        assert_eq!(fx.tracker.get(&fx.user_id).unwrap().device_id, device.id);
    }

    #[tokio::test]
    async fn test_missing_firmware_counts_as_unsecured() {
        let fx = setup().await;
        let device = online_device(&fx, "thermo-2", None).await;

        let result = fx
            .service
            .connect(&fx.user_id, &device.id.to_string(), ip(), None)
            .await;
        assert!(result.is_ok());
        assert_eq!(fx.alert_store.list(None, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_permission_lookup_failure_fails_closed() {
        let fx = setup().await;
        let device = online_device(&fx, "cam-1", Some("1.0")).await;

        // No such user row: the resolver errors and the engine treats it
        // as "no permission"
        let result = fx
            .service
            .connect("ghost-user", &device.id.to_string(), ip(), None)
            .await;
        assert!(matches!(result, Err(ConnectError::AccessDenied)));

        let attempts = fx.attempt_store.list(10).await.unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].attempt_type, "unauthorized_access");
    }

    #[tokio::test]
    async fn test_repeated_denials_insert_separate_rows() {
        let fx = setup().await;
        let device = online_device(&fx, "cam-1", Some("1.0")).await;
        let raw = device.id.to_string();

        for _ in 0..3 {
            let result = fx.service.connect(&fx.user_id, &raw, ip(), None).await;
            assert!(matches!(result, Err(ConnectError::AccessDenied)));
        }

        let attempts = fx.attempt_store.list(10).await.unwrap();
        assert_eq!(attempts.len(), 3);
        assert!(attempts.iter().all(|a| a.attempt_count == 1));
    }

    #[tokio::test]
    async fn test_reconnect_overwrites_tracked_connection() {
        let fx = setup().await;
        let first = online_device(&fx, "cam-1", Some("1.0")).await;
        let second = online_device(&fx, "cam-2", Some("1.0")).await;

        fx.service
            .connect(&fx.admin_id, &first.id.to_string(), ip(), None)
            .await
            .unwrap();
        fx.service
            .connect(&fx.admin_id, &second.id.to_string(), ip(), None)
            .await
            .unwrap();

        // Second connect silently replaced the first; no audit rows either way
        assert_eq!(fx.tracker.get(&fx.admin_id).unwrap().device_id, second.id);
        assert_eq!(fx.attempt_store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_requires_matching_connection() {
        let fx = setup().await;
        let device = online_device(&fx, "cam-1", Some("1.0")).await;

        // Nothing tracked yet
        let result = fx
            .service
            .disconnect(&fx.admin_id, &device.id.to_string())
            .await;
        assert!(matches!(result, Err(DisconnectError::NotConnected)));

        fx.service
            .connect(&fx.admin_id, &device.id.to_string(), ip(), None)
            .await
            .unwrap();

        // Wrong device id also reads as not connected
        let result = fx.service.disconnect(&fx.admin_id, "12345").await;
        assert!(matches!(result, Err(DisconnectError::NotConnected)));

        let conn = fx
            .service
            .disconnect(&fx.admin_id, &device.id.to_string())
            .await
            .expect("disconnect should succeed");
        assert_eq!(conn.device_id, device.id);
        assert!(fx.tracker.get(&fx.admin_id).is_none());

        // Disconnect is idempotent-safe: a second call errors, never panics
        let again = fx
            .service
            .disconnect(&fx.admin_id, &device.id.to_string())
            .await;
        assert!(matches!(again, Err(DisconnectError::NotConnected)));
    }

    #[tokio::test]
    async fn test_sessions_do_not_interfere_across_users() {
        let fx = setup().await;
        let device = online_device(&fx, "thermo-1", None).await;
        let raw = device.id.to_string();

        fx.service.connect(&fx.admin_id, &raw, ip(), None).await.unwrap();
        fx.service.connect(&fx.user_id, &raw, ip(), None).await.unwrap();

        fx.service.disconnect(&fx.admin_id, &raw).await.unwrap();

        // The other user's connection survives
        assert_eq!(fx.tracker.get(&fx.user_id).unwrap().device_id, device.id);
    }
}
