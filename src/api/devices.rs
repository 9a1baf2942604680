use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::errors::api::DeviceApiError;
use crate::services::TokenService;
use crate::stores::device_store::NewDevice;
use crate::stores::{DeviceLogStore, DeviceStore};
use crate::types::dto::devices::{
    DeviceListResponse, DeviceResponse, HeartbeatResponse, RegisterDeviceRequest,
};

/// Device registry API endpoints
pub struct DevicesApi {
    device_store: Arc<DeviceStore>,
    device_log_store: Arc<DeviceLogStore>,
    token_service: Arc<TokenService>,
}

impl DevicesApi {
    pub fn new(
        device_store: Arc<DeviceStore>,
        device_log_store: Arc<DeviceLogStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            device_store,
            device_log_store,
            token_service,
        }
    }

    fn authenticate(&self, auth: &BearerAuth) -> Result<(), DeviceApiError> {
        self.token_service
            .validate_jwt(&auth.0.token)
            .map(|_| ())
            .map_err(|_| DeviceApiError::unauthorized())
    }
}

/// API tags for device endpoints
#[derive(Tags)]
enum DeviceTags {
    /// Device registry endpoints
    Devices,
}

#[OpenApi]
impl DevicesApi {
    /// List registered devices, newest first
    #[oai(path = "/devices", method = "get", tag = "DeviceTags::Devices")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<DeviceListResponse>, DeviceApiError> {
        self.authenticate(&auth)?;

        let devices = self
            .device_store
            .list()
            .await
            .map_err(DeviceApiError::from_internal_error)?;

        let devices: Vec<DeviceResponse> = devices.into_iter().map(Into::into).collect();
        let total = devices.len() as u64;
        Ok(Json(DeviceListResponse { devices, total }))
    }

    /// Fetch a single device
    #[oai(path = "/devices/:device_id", method = "get", tag = "DeviceTags::Devices")]
    async fn get(
        &self,
        device_id: Path<i32>,
        auth: BearerAuth,
    ) -> Result<Json<DeviceResponse>, DeviceApiError> {
        self.authenticate(&auth)?;

        let device = self
            .device_store
            .find_by_id(device_id.0)
            .await
            .map_err(DeviceApiError::from_internal_error)?
            .ok_or_else(|| DeviceApiError::not_found(device_id.0))?;

        Ok(Json(device.into()))
    }

    /// Register a new device
    ///
    /// Devices start offline until their first heartbeat.
    #[oai(path = "/devices", method = "post", tag = "DeviceTags::Devices")]
    async fn register(
        &self,
        body: Json<RegisterDeviceRequest>,
        auth: BearerAuth,
    ) -> Result<Json<DeviceResponse>, DeviceApiError> {
        self.authenticate(&auth)?;

        let body = body.0;
        let device = self
            .device_store
            .register(NewDevice {
                name: body.name,
                device_type: body.device_type,
                mac_address: body.mac_address,
                ip_address: body.ip_address,
                location: body.location.unwrap_or_else(|| "unknown".to_string()),
                firmware_version: body.firmware_version,
            })
            .await
            .map_err(DeviceApiError::from_internal_error)?;

        Ok(Json(device.into()))
    }

    /// Record a device heartbeat
    ///
    /// Marks the device online and refreshes last_seen.
    #[oai(
        path = "/devices/:device_id/heartbeat",
        method = "post",
        tag = "DeviceTags::Devices"
    )]
    async fn heartbeat(
        &self,
        device_id: Path<i32>,
        auth: BearerAuth,
    ) -> Result<Json<HeartbeatResponse>, DeviceApiError> {
        self.authenticate(&auth)?;

        let device = self
            .device_store
            .heartbeat(device_id.0)
            .await
            .map_err(DeviceApiError::from_internal_error)?;

        Ok(Json(HeartbeatResponse {
            id: device.id,
            status: device.status,
            last_seen: device.last_seen.unwrap_or_default(),
        }))
    }

    /// Activity history for a device
    #[oai(path = "/devices/:device_id/logs", method = "get", tag = "DeviceTags::Devices")]
    async fn logs(
        &self,
        device_id: Path<i32>,
        limit: Query<Option<u64>>,
        auth: BearerAuth,
    ) -> Result<Json<Vec<DeviceLogEntry>>, DeviceApiError> {
        self.authenticate(&auth)?;

        // 404 for unknown devices instead of an empty history
        self.device_store
            .find_by_id(device_id.0)
            .await
            .map_err(DeviceApiError::from_internal_error)?
            .ok_or_else(|| DeviceApiError::not_found(device_id.0))?;

        let rows = self
            .device_log_store
            .list_for_device(device_id.0, limit.0.unwrap_or(50))
            .await
            .map_err(DeviceApiError::from_internal_error)?;

        Ok(Json(rows.into_iter().map(Into::into).collect()))
    }
}

/// Response model for a device log row
#[derive(poem_openapi::Object, Debug)]
pub struct DeviceLogEntry {
    pub id: i64,
    pub device_id: i32,
    pub user_id: Option<String>,
    pub action: String,
    pub details: serde_json::Value,
    pub created_at: i64,
}

impl From<crate::types::db::device_log::Model> for DeviceLogEntry {
    fn from(log: crate::types::db::device_log::Model) -> Self {
        let details = serde_json::from_str(&log.details).unwrap_or(serde_json::Value::Null);
        Self {
            id: log.id,
            device_id: log.device_id,
            user_id: log.user_id,
            action: log.action,
            details,
            created_at: log.created_at,
        }
    }
}
