use poem_openapi::Object;

use super::devices::DeviceResponse;

/// Response model for a successful device connection
#[derive(Object, Debug)]
pub struct ConnectResponse {
    /// Always true on the success path
    pub success: bool,

    /// Human-readable confirmation
    pub message: String,

    /// Snapshot of the connected device
    pub device: DeviceResponse,
}

/// Response model for a successful disconnect
#[derive(Object, Debug)]
pub struct DisconnectResponse {
    /// Always true on the success path
    pub success: bool,

    /// Human-readable confirmation
    pub message: String,
}
