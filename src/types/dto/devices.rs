use poem_openapi::Object;

use crate::types::db::device;

/// Request model for registering a device
#[derive(Object, Debug)]
pub struct RegisterDeviceRequest {
    /// Display name (1-100 characters)
    #[oai(validator(min_length = 1, max_length = 100))]
    pub name: String,

    /// Device category, e.g. "camera", "thermostat"
    #[oai(validator(min_length = 1, max_length = 64))]
    pub device_type: String,

    /// MAC address, unique when present
    pub mac_address: Option<String>,

    /// Last known IP address
    pub ip_address: Option<String>,

    /// Physical location label
    #[oai(validator(max_length = 100))]
    pub location: Option<String>,

    /// Firmware version; a non-empty value marks the device as
    /// enforcing its own access control
    pub firmware_version: Option<String>,
}

/// Response model representing a registered device
#[derive(Object, Debug, Clone)]
pub struct DeviceResponse {
    pub id: i32,
    pub name: String,
    pub device_type: String,
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
    pub status: String,
    pub location: String,
    pub firmware_version: Option<String>,
    pub last_seen: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<device::Model> for DeviceResponse {
    fn from(d: device::Model) -> Self {
        Self {
            id: d.id,
            name: d.name,
            device_type: d.device_type,
            mac_address: d.mac_address,
            ip_address: d.ip_address,
            status: d.status,
            location: d.location,
            firmware_version: d.firmware_version,
            last_seen: d.last_seen,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Response model for device listings
#[derive(Object, Debug)]
pub struct DeviceListResponse {
    pub devices: Vec<DeviceResponse>,
    pub total: u64,
}

/// Response model for the heartbeat endpoint
#[derive(Object, Debug)]
pub struct HeartbeatResponse {
    pub id: i32,
    pub status: String,
    pub last_seen: i64,
}
