use serde_json::json;
use std::sync::Arc;

use crate::stores::alert_store::NewAlert;
use crate::stores::attempt_store::NewAttempt;
use crate::stores::{AlertStore, AttemptStore, DeviceLogStore};
use crate::types::internal::security::{AttemptType, Severity};

/// Best-effort audit writers used by the access engine and the alerts API.
///
/// Every method swallows store failures after logging them: an audit insert
/// that fails must never change an access decision that has already been
/// made. Decision integrity is prioritized over audit completeness.
pub struct SecurityRecorder {
    attempt_store: Arc<AttemptStore>,
    alert_store: Arc<AlertStore>,
    device_log_store: Arc<DeviceLogStore>,
}

impl SecurityRecorder {
    pub fn new(
        attempt_store: Arc<AttemptStore>,
        alert_store: Arc<AlertStore>,
        device_log_store: Arc<DeviceLogStore>,
    ) -> Self {
        Self {
            attempt_store,
            alert_store,
            device_log_store,
        }
    }

    /// Record a blocked attempt
    ///
    /// `request_details` always carries the acting user_id and the
    /// blocked_reason, merged with any caller-supplied keys. attempt_count
    /// is always 1; repeated attempts from one source are separate rows.
    pub async fn record_blocked_attempt(
        &self,
        user_id: &str,
        source_ip: Option<String>,
        target_device_id: Option<i32>,
        attempt_type: AttemptType,
        blocked_reason: &str,
        user_agent: Option<String>,
        extra_details: serde_json::Map<String, serde_json::Value>,
    ) {
        let mut details = extra_details;
        details.insert("user_id".to_string(), json!(user_id));
        details.insert("blocked_reason".to_string(), json!(blocked_reason));

        let attempt = NewAttempt {
            source_ip,
            target_device_id,
            attempt_type,
            user_agent,
            request_details: serde_json::Value::Object(details),
        };

        if let Err(e) = self.attempt_store.record(attempt).await {
            tracing::error!(
                user_id,
                ?target_device_id,
                attempt_type = attempt_type.as_str(),
                "Failed to record blocked attempt: {}",
                e
            );
        }
    }

    /// Record a security alert (always created in status `active`)
    pub async fn record_security_alert(
        &self,
        device_id: Option<i32>,
        alert_type: &str,
        severity: Severity,
        description: String,
        source_ip: Option<String>,
        metadata: serde_json::Value,
    ) {
        let alert = NewAlert {
            device_id,
            alert_type: alert_type.to_string(),
            severity,
            description,
            source_ip,
            metadata,
        };

        if let Err(e) = self.alert_store.create(alert).await {
            tracing::error!(
                ?device_id,
                alert_type,
                severity = severity.as_str(),
                "Failed to record security alert: {}",
                e
            );
        }
    }

    /// Append a device activity log row
    pub async fn record_device_log(
        &self,
        device_id: i32,
        user_id: Option<String>,
        action: &str,
        details: serde_json::Value,
    ) {
        if let Err(e) = self
            .device_log_store
            .append(device_id, user_id.clone(), action, details)
            .await
        {
            tracing::error!(
                device_id,
                ?user_id,
                action,
                "Failed to record device log: {}",
                e
            );
        }
    }
}
