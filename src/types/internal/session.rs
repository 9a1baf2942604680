use crate::types::db::device;

/// Ephemeral marker of "this user is currently interacting with this device".
///
/// Lives only in the in-process session tracker, never in the database. Not
/// a network socket; purely authorization/UI bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConnection {
    pub device_id: i32,
    pub device_name: String,
    pub device_type: String,
    pub location: String,
    pub connected_at: i64,
}

impl SessionConnection {
    /// Snapshot the device fields that the dashboard needs while connected.
    pub fn from_device(device: &device::Model, connected_at: i64) -> Self {
        Self {
            device_id: device.id,
            device_name: device.name.clone(),
            device_type: device.device_type.clone(),
            location: device.location.clone(),
            connected_at,
        }
    }
}
