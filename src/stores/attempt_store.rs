use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::errors::InternalError;
use crate::types::db::blocked_attempt::{self, ActiveModel, Entity as BlockedAttempt};
use crate::types::internal::security::AttemptType;

/// Fields accepted when recording a blocked attempt
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub source_ip: Option<String>,
    pub target_device_id: Option<i32>,
    pub attempt_type: AttemptType,
    pub user_agent: Option<String>,
    pub request_details: serde_json::Value,
}

/// AttemptStore appends immutable blocked-attempt rows
///
/// Every insert is a fresh row with attempt_count = 1. Repeated attempts
/// from the same source are separate rows; there is no coalescing window.
pub struct AttemptStore {
    db: DatabaseConnection,
}

impl AttemptStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a blocked-attempt row
    pub async fn record(&self, new: NewAttempt) -> Result<blocked_attempt::Model, InternalError> {
        let details = serde_json::to_string(&new.request_details)
            .map_err(|e| InternalError::parse("request_details", e.to_string()))?;

        let model = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            source_ip: Set(new.source_ip),
            target_device_id: Set(new.target_device_id),
            attempt_type: Set(new.attempt_type.as_str().to_string()),
            blocked_at: Set(Utc::now().timestamp()),
            attempt_count: Set(1),
            user_agent: Set(new.user_agent),
            request_details: Set(details),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_blocked_attempt", e))
    }

    /// List attempts, newest first
    pub async fn list(&self, limit: u64) -> Result<Vec<blocked_attempt::Model>, InternalError> {
        BlockedAttempt::find()
            .order_by_desc(blocked_attempt::Column::BlockedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_blocked_attempts", e))
    }

    /// Total number of recorded attempts
    pub async fn count(&self) -> Result<u64, InternalError> {
        BlockedAttempt::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_blocked_attempts", e))
    }

    /// Attempts targeting a given device
    pub async fn list_for_device(
        &self,
        device_id: i32,
    ) -> Result<Vec<blocked_attempt::Model>, InternalError> {
        BlockedAttempt::find()
            .filter(blocked_attempt::Column::TargetDeviceId.eq(device_id))
            .order_by_desc(blocked_attempt::Column::BlockedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_attempts_for_device", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_db() -> AttemptStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        AttemptStore::new(db)
    }

    fn sample_attempt() -> NewAttempt {
        NewAttempt {
            source_ip: Some("192.0.2.10".to_string()),
            target_device_id: Some(3),
            attempt_type: AttemptType::UnauthorizedAccess,
            user_agent: Some("curl/8.0".to_string()),
            request_details: serde_json::json!({
                "user_id": "u-1",
                "blocked_reason": "no_permission_secured_device",
            }),
        }
    }

    #[tokio::test]
    async fn test_record_stamps_count_and_time() {
        let store = setup_test_db().await;

        let row = store.record(sample_attempt()).await.expect("record failed");

        assert_eq!(row.attempt_count, 1);
        assert_eq!(row.attempt_type, "unauthorized_access");
        assert!(row.blocked_at > 0);

        let details: serde_json::Value = serde_json::from_str(&row.request_details).unwrap();
        assert_eq!(details["user_id"], "u-1");
    }

    #[tokio::test]
    async fn test_repeated_attempts_insert_separate_rows() {
        // Each attempt is its own row with attempt_count = 1; there is no
        // per-source coalescing window.
        let store = setup_test_db().await;

        store.record(sample_attempt()).await.unwrap();
        store.record(sample_attempt()).await.unwrap();

        let rows = store.list(10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.attempt_count == 1));
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_for_device_filters() {
        let store = setup_test_db().await;

        store.record(sample_attempt()).await.unwrap();
        let mut other = sample_attempt();
        other.target_device_id = Some(9);
        store.record(other).await.unwrap();

        let rows = store.list_for_device(3).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].target_device_id, Some(3));
    }
}
