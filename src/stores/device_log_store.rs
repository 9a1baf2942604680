use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::errors::InternalError;
use crate::types::db::device_log::{self, ActiveModel, Entity as DeviceLog};

/// DeviceLogStore appends device activity rows
pub struct DeviceLogStore {
    db: DatabaseConnection,
}

impl DeviceLogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append a log row for a device action
    pub async fn append(
        &self,
        device_id: i32,
        user_id: Option<String>,
        action: &str,
        details: serde_json::Value,
    ) -> Result<device_log::Model, InternalError> {
        let details = serde_json::to_string(&details)
            .map_err(|e| InternalError::parse("device_log_details", e.to_string()))?;

        let model = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            device_id: Set(device_id),
            user_id: Set(user_id),
            action: Set(action.to_string()),
            details: Set(details),
            created_at: Set(Utc::now().timestamp()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_device_log", e))
    }

    /// History for a device, newest first
    pub async fn list_for_device(
        &self,
        device_id: i32,
        limit: u64,
    ) -> Result<Vec<device_log::Model>, InternalError> {
        DeviceLog::find()
            .filter(device_log::Column::DeviceId.eq(device_id))
            .order_by_desc(device_log::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_device_logs", e))
    }
}
