use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::internal::DeviceError;
use crate::errors::InternalError;
use crate::types::db::device::{self, ActiveModel, Entity as Device};
use crate::types::internal::security::DeviceStatus;

/// Fields accepted when registering a device
#[derive(Debug, Clone)]
pub struct NewDevice {
    pub name: String,
    pub device_type: String,
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
    pub location: String,
    pub firmware_version: Option<String>,
}

/// DeviceStore manages the device registry
pub struct DeviceStore {
    db: DatabaseConnection,
}

impl DeviceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Look up a device by id
    pub async fn find_by_id(&self, device_id: i32) -> Result<Option<device::Model>, InternalError> {
        Device::find_by_id(device_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_device_by_id", e))
    }

    /// List all devices, newest first
    pub async fn list(&self) -> Result<Vec<device::Model>, InternalError> {
        Device::find()
            .order_by_desc(device::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_devices", e))
    }

    /// Register a new device
    ///
    /// New devices start offline; a heartbeat brings them online.
    pub async fn register(&self, new: NewDevice) -> Result<device::Model, InternalError> {
        if let Some(mac) = &new.mac_address {
            let existing = Device::find()
                .filter(device::Column::MacAddress.eq(mac))
                .one(&self.db)
                .await
                .map_err(|e| InternalError::database("check_duplicate_mac", e))?;
            if existing.is_some() {
                return Err(DeviceError::DuplicateMacAddress(mac.clone()).into());
            }
        }

        let now = Utc::now().timestamp();
        let model = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(new.name),
            device_type: Set(new.device_type),
            mac_address: Set(new.mac_address),
            ip_address: Set(new.ip_address),
            status: Set(DeviceStatus::Offline.as_str().to_string()),
            location: Set(new.location),
            firmware_version: Set(new.firmware_version),
            last_seen: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_device", e))
    }

    /// Record a heartbeat: device comes online and last_seen is refreshed
    pub async fn heartbeat(&self, device_id: i32) -> Result<device::Model, InternalError> {
        let device = self
            .find_by_id(device_id)
            .await?
            .ok_or(DeviceError::NotFound(device_id))?;

        let now = Utc::now().timestamp();
        let mut active: ActiveModel = device.into();
        active.status = Set(DeviceStatus::Online.as_str().to_string());
        active.last_seen = Set(Some(now));
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("heartbeat_device", e))
    }

    /// Set a device's status, refreshing updated_at
    pub async fn set_status(
        &self,
        device_id: i32,
        status: DeviceStatus,
    ) -> Result<device::Model, InternalError> {
        let device = self
            .find_by_id(device_id)
            .await?
            .ok_or(DeviceError::NotFound(device_id))?;

        let mut active: ActiveModel = device.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_device_status", e))
    }
}
