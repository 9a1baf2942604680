use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::errors::internal::AlertError;
use crate::errors::InternalError;
use crate::types::db::security_alert::{self, ActiveModel, Entity as SecurityAlert};
use crate::types::internal::security::{AlertStatus, Severity};

/// Fields accepted when recording a security alert
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub device_id: Option<i32>,
    pub alert_type: String,
    pub severity: Severity,
    pub description: String,
    pub source_ip: Option<String>,
    pub metadata: serde_json::Value,
}

/// Counts returned by the stats query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertCounts {
    pub total: u64,
    pub active: u64,
    pub investigating: u64,
    pub resolved: u64,
    pub false_positive: u64,
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub critical: u64,
}

/// AlertStore manages security alert rows
///
/// Alerts are append-mostly: the only mutation is the resolve transition.
pub struct AlertStore {
    db: DatabaseConnection,
}

impl AlertStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new alert
    ///
    /// Status always starts as `active`; detected_at is stamped at write.
    pub async fn create(&self, new: NewAlert) -> Result<security_alert::Model, InternalError> {
        let metadata = serde_json::to_string(&new.metadata)
            .map_err(|e| InternalError::parse("alert_metadata", e.to_string()))?;

        let model = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            device_id: Set(new.device_id),
            alert_type: Set(new.alert_type),
            severity: Set(new.severity.as_str().to_string()),
            description: Set(new.description),
            source_ip: Set(new.source_ip),
            detected_at: Set(Utc::now().timestamp()),
            resolved_at: Set(None),
            status: Set(AlertStatus::Active.as_str().to_string()),
            resolved_by: Set(None),
            metadata: Set(metadata),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_security_alert", e))
    }

    /// Look up an alert by id
    pub async fn find_by_id(
        &self,
        alert_id: i32,
    ) -> Result<Option<security_alert::Model>, InternalError> {
        SecurityAlert::find_by_id(alert_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_alert_by_id", e))
    }

    /// List alerts, newest first, optionally filtered by status
    pub async fn list(
        &self,
        status: Option<AlertStatus>,
        limit: u64,
    ) -> Result<Vec<security_alert::Model>, InternalError> {
        let mut query = SecurityAlert::find().order_by_desc(security_alert::Column::DetectedAt);
        if let Some(status) = status {
            query = query.filter(security_alert::Column::Status.eq(status.as_str()));
        }
        query
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_alerts", e))
    }

    /// Resolve an alert: active -> resolved
    ///
    /// Sets resolved_at and resolved_by in the same write; merges an
    /// optional resolution_note into the metadata payload. Alerts in any
    /// other status are rejected without mutation.
    pub async fn resolve(
        &self,
        alert_id: i32,
        resolved_by: &str,
        resolution_note: Option<String>,
    ) -> Result<security_alert::Model, InternalError> {
        let alert = self
            .find_by_id(alert_id)
            .await?
            .ok_or(AlertError::NotFound(alert_id))?;

        if AlertStatus::parse(&alert.status) != Some(AlertStatus::Active) {
            return Err(AlertError::NotResolvable {
                id: alert_id,
                status: alert.status,
            }
            .into());
        }

        let mut metadata: serde_json::Value =
            serde_json::from_str(&alert.metadata).unwrap_or_else(|_| serde_json::json!({}));
        if let Some(note) = resolution_note {
            if let Some(map) = metadata.as_object_mut() {
                map.insert("resolution_note".to_string(), serde_json::json!(note));
            }
        }
        let metadata = serde_json::to_string(&metadata)
            .map_err(|e| InternalError::parse("alert_metadata", e.to_string()))?;

        let mut active: ActiveModel = alert.into();
        active.status = Set(AlertStatus::Resolved.as_str().to_string());
        active.resolved_at = Set(Some(Utc::now().timestamp()));
        active.resolved_by = Set(Some(resolved_by.to_string()));
        active.metadata = Set(metadata);

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("resolve_alert", e))
    }

    /// Delete an alert row
    pub async fn delete(&self, alert_id: i32) -> Result<(), InternalError> {
        let result = SecurityAlert::delete_by_id(alert_id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_alert", e))?;

        if result.rows_affected == 0 {
            return Err(AlertError::NotFound(alert_id).into());
        }
        Ok(())
    }

    /// Aggregate counts for the dashboard summary
    pub async fn counts(&self) -> Result<AlertCounts, InternalError> {
        let count_status = |status: AlertStatus| {
            SecurityAlert::find()
                .filter(security_alert::Column::Status.eq(status.as_str()))
                .count(&self.db)
        };
        let count_severity = |severity: Severity| {
            SecurityAlert::find()
                .filter(security_alert::Column::Severity.eq(severity.as_str()))
                .count(&self.db)
        };

        let map = |e| InternalError::database("count_alerts", e);

        Ok(AlertCounts {
            total: SecurityAlert::find().count(&self.db).await.map_err(map)?,
            active: count_status(AlertStatus::Active).await.map_err(map)?,
            investigating: count_status(AlertStatus::Investigating)
                .await
                .map_err(map)?,
            resolved: count_status(AlertStatus::Resolved).await.map_err(map)?,
            false_positive: count_status(AlertStatus::FalsePositive)
                .await
                .map_err(map)?,
            low: count_severity(Severity::Low).await.map_err(map)?,
            medium: count_severity(Severity::Medium).await.map_err(map)?,
            high: count_severity(Severity::High).await.map_err(map)?,
            critical: count_severity(Severity::Critical).await.map_err(map)?,
        })
    }
}
