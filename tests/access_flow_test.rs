// End-to-end flows through the wired application: registration, heartbeat,
// access decisions, audit rows and the alert resolve lifecycle.

mod common;

use common::setup_app_data;
use iotwatch_backend::services::access_service::{ConnectError, DisconnectError};
use iotwatch_backend::stores::device_store::NewDevice;
use iotwatch_backend::types::internal::auth::UserRole;

fn device(name: &str, firmware: Option<&str>) -> NewDevice {
    NewDevice {
        name: name.to_string(),
        device_type: "camera".to_string(),
        mac_address: None,
        ip_address: Some("10.0.0.20".to_string()),
        location: "floor-2".to_string(),
        firmware_version: firmware.map(str::to_string),
    }
}

#[tokio::test]
async fn full_connect_flow_for_admin() {
    let app = setup_app_data().await;

    let admin_id = app
        .credential_store
        .add_user("root".into(), "pw".into(), UserRole::Admin)
        .await
        .unwrap();

    let registered = app.device_store.register(device("cam-1", Some("1.0"))).await.unwrap();
    app.device_store.heartbeat(registered.id).await.unwrap();

    let connected = app
        .access_service
        .connect(&admin_id, &registered.id.to_string(), None, None)
        .await
        .expect("admin connect should succeed");
    assert_eq!(connected.id, registered.id);
    assert_eq!(connected.status, "online");

    // Fully permitted connections leave no audit trail
    assert_eq!(app.attempt_store.count().await.unwrap(), 0);
    assert!(app.alert_store.list(None, 10).await.unwrap().is_empty());

    // But the device history has the connect entry
    let logs = app
        .device_log_store
        .list_for_device(registered.id, 10)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "device_connected");

    app.access_service
        .disconnect(&admin_id, &registered.id.to_string())
        .await
        .expect("disconnect should succeed");
    assert!(app.session_tracker.get(&admin_id).is_none());

    let logs = app
        .device_log_store
        .list_for_device(registered.id, 10)
        .await
        .unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].action, "device_disconnected");
}

#[tokio::test]
async fn denied_connect_leaves_blocked_attempt_trail() {
    let app = setup_app_data().await;

    let user_id = app
        .credential_store
        .add_user("joe".into(), "pw".into(), UserRole::User)
        .await
        .unwrap();

    let registered = app.device_store.register(device("cam-1", Some("2.4.1"))).await.unwrap();
    app.device_store.heartbeat(registered.id).await.unwrap();

    let result = app
        .access_service
        .connect(
            &user_id,
            &registered.id.to_string(),
            Some("203.0.113.9".parse().unwrap()),
            Some("Mozilla/5.0".to_string()),
        )
        .await;
    assert!(matches!(result, Err(ConnectError::AccessDenied)));

    let attempts = app.attempt_store.list_for_device(registered.id).await.unwrap();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].attempt_type, "unauthorized_access");
    assert_eq!(attempts[0].attempt_count, 1);
    assert_eq!(attempts[0].source_ip.as_deref(), Some("203.0.113.9"));
    assert_eq!(attempts[0].user_agent.as_deref(), Some("Mozilla/5.0"));

    let details: serde_json::Value = serde_json::from_str(&attempts[0].request_details).unwrap();
    assert_eq!(details["user_id"], user_id.as_str());
    assert_eq!(details["blocked_reason"], "no_permission_secured_device");

    // Denials never establish a session
    assert!(app.session_tracker.get(&user_id).is_none());
}

#[tokio::test]
async fn unsecured_device_access_raises_alert_then_resolves() {
    let app = setup_app_data().await;

    let admin_id = app
        .credential_store
        .add_user("root".into(), "pw".into(), UserRole::Admin)
        .await
        .unwrap();
    let user_id = app
        .credential_store
        .add_user("joe".into(), "pw".into(), UserRole::User)
        .await
        .unwrap();

    // Empty firmware version: the device enforces nothing itself
    let registered = app.device_store.register(device("thermo-1", Some(""))).await.unwrap();
    app.device_store.heartbeat(registered.id).await.unwrap();

    app.access_service
        .connect(&user_id, &registered.id.to_string(), None, None)
        .await
        .expect("unsecured connect should be allowed");
    assert_eq!(
        app.session_tracker.get(&user_id).unwrap().device_id,
        registered.id
    );

    let alerts = app.alert_store.list(None, 10).await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, "medium");
    assert_eq!(alerts[0].status, "active");
    assert_eq!(alerts[0].device_id, Some(registered.id));

    // The resolve transition stamps resolver and timestamp together
    let resolved = app
        .alert_store
        .resolve(alerts[0].id, &admin_id, Some("reviewed".into()))
        .await
        .unwrap();
    assert_eq!(resolved.status, "resolved");
    assert!(resolved.resolved_at.is_some());
    assert_eq!(resolved.resolved_by.as_deref(), Some(admin_id.as_str()));

    // And cannot run twice
    let again = app.alert_store.resolve(alerts[0].id, &admin_id, None).await;
    assert!(again.is_err());
}

#[tokio::test]
async fn unknown_and_offline_devices_are_blocked_and_logged() {
    let app = setup_app_data().await;

    let user_id = app
        .credential_store
        .add_user("joe".into(), "pw".into(), UserRole::User)
        .await
        .unwrap();

    // Unknown device id
    let result = app.access_service.connect(&user_id, "999", None, None).await;
    assert!(matches!(result, Err(ConnectError::DeviceNotFound)));

    // Registered but never heartbeaten: still offline
    let registered = app.device_store.register(device("cam-1", Some("1.0"))).await.unwrap();
    let result = app
        .access_service
        .connect(&user_id, &registered.id.to_string(), None, None)
        .await;
    assert!(matches!(result, Err(ConnectError::DeviceOffline)));

    let attempts = app.attempt_store.list(10).await.unwrap();
    assert_eq!(attempts.len(), 2);

    let types: Vec<&str> = attempts.iter().map(|a| a.attempt_type.as_str()).collect();
    assert!(types.contains(&"invalid_device"));
    assert!(types.contains(&"offline_device"));

    let invalid = attempts
        .iter()
        .find(|a| a.attempt_type == "invalid_device")
        .unwrap();
    assert_eq!(invalid.target_device_id, Some(999));
}

#[tokio::test]
async fn disconnect_without_connection_is_safe() {
    let app = setup_app_data().await;

    let user_id = app
        .credential_store
        .add_user("joe".into(), "pw".into(), UserRole::User)
        .await
        .unwrap();

    let result = app.access_service.disconnect(&user_id, "1").await;
    assert!(matches!(result, Err(DisconnectError::NotConnected)));

    // And again, to confirm nothing panics or mutates
    let result = app.access_service.disconnect(&user_id, "1").await;
    assert!(matches!(result, Err(DisconnectError::NotConnected)));
    assert_eq!(app.attempt_store.count().await.unwrap(), 0);
}
