use poem_openapi::Object;

use crate::types::db::security_alert;

/// Request model for creating a security alert via the API
#[derive(Object, Debug)]
pub struct CreateAlertRequest {
    /// Device the alert refers to, if any
    pub device_id: Option<i32>,

    /// Alert category, e.g. "Port Scan Detected"
    #[oai(validator(min_length = 1, max_length = 100))]
    pub alert_type: String,

    /// One of: low, medium, high, critical
    pub severity: String,

    /// Human-readable description
    #[oai(validator(min_length = 1, max_length = 1000))]
    pub description: String,

    /// Source IP that triggered the alert
    pub source_ip: Option<String>,

    /// Free-form key/value payload
    pub metadata: Option<serde_json::Value>,
}

/// Request model for resolving an alert
#[derive(Object, Debug, Default)]
pub struct ResolveAlertRequest {
    /// Optional note merged into the alert metadata
    pub resolution_note: Option<String>,
}

/// Response model representing a security alert
#[derive(Object, Debug)]
pub struct AlertResponse {
    pub id: i32,
    pub device_id: Option<i32>,
    pub alert_type: String,
    pub severity: String,
    pub description: String,
    pub source_ip: Option<String>,
    pub detected_at: i64,
    pub resolved_at: Option<i64>,
    pub status: String,
    pub resolved_by: Option<String>,
    pub metadata: serde_json::Value,
}

impl From<security_alert::Model> for AlertResponse {
    fn from(a: security_alert::Model) -> Self {
        let metadata =
            serde_json::from_str(&a.metadata).unwrap_or(serde_json::Value::Null);
        Self {
            id: a.id,
            device_id: a.device_id,
            alert_type: a.alert_type,
            severity: a.severity,
            description: a.description,
            source_ip: a.source_ip,
            detected_at: a.detected_at,
            resolved_at: a.resolved_at,
            status: a.status,
            resolved_by: a.resolved_by,
            metadata,
        }
    }
}

/// Response model for alert listings
#[derive(Object, Debug)]
pub struct AlertListResponse {
    pub alerts: Vec<AlertResponse>,
    pub total: u64,
}

/// Response model for the deletion endpoint
#[derive(Object, Debug)]
pub struct DeleteAlertResponse {
    pub success: bool,
    pub message: String,
}

/// Aggregate counts for the dashboard summary card
#[derive(Object, Debug)]
pub struct AlertStatsSummary {
    pub total: u64,
    pub active: u64,
    pub investigating: u64,
    pub resolved: u64,
    pub false_positive: u64,
    pub by_severity: SeverityCounts,
    pub blocked_attempts_total: u64,
}

/// Per-severity alert counts
#[derive(Object, Debug)]
pub struct SeverityCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub critical: u64,
}
