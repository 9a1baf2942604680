use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Failure body for the device-access endpoints
///
/// The dashboard client keys off the `success` flag, so failure responses
/// carry the same envelope shape as successes.
#[derive(Object, Debug)]
pub struct AccessErrorResponse {
    /// Always false on the failure path
    pub success: bool,

    /// Human-readable error message
    pub message: String,
}

impl AccessErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Device-access error types
#[derive(ApiResponse, Debug)]
pub enum DeviceAccessError {
    /// Device id is not a positive integer
    #[oai(status = 400)]
    InvalidDeviceId(Json<AccessErrorResponse>),

    /// No device with the requested id
    #[oai(status = 404)]
    DeviceNotFound(Json<AccessErrorResponse>),

    /// Device exists but is not online
    #[oai(status = 400)]
    DeviceOffline(Json<AccessErrorResponse>),

    /// User lacks permission for a security-enabled device
    #[oai(status = 403)]
    AccessDenied(Json<AccessErrorResponse>),

    /// Disconnect without an active connection to the device
    #[oai(status = 400)]
    NotConnected(Json<AccessErrorResponse>),

    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthorized(Json<AccessErrorResponse>),

    /// Storage failure during decision evaluation
    #[oai(status = 500)]
    InternalError(Json<AccessErrorResponse>),
}

impl DeviceAccessError {
    pub fn invalid_device_id() -> Self {
        Self::InvalidDeviceId(Json(AccessErrorResponse::new("Invalid device ID")))
    }

    pub fn device_not_found() -> Self {
        Self::DeviceNotFound(Json(AccessErrorResponse::new("Device not found")))
    }

    pub fn device_offline() -> Self {
        Self::DeviceOffline(Json(AccessErrorResponse::new(
            "Device is currently offline",
        )))
    }

    pub fn access_denied() -> Self {
        Self::AccessDenied(Json(AccessErrorResponse::new(
            "Access denied. You do not have permission to access this device.",
        )))
    }

    pub fn not_connected() -> Self {
        Self::NotConnected(Json(AccessErrorResponse::new(
            "You are not connected to this device",
        )))
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized(Json(AccessErrorResponse::new("Authentication required")))
    }

    /// Generic 500. Internal details are logged at the failure site and
    /// never echoed to the client.
    pub fn internal_error() -> Self {
        Self::InternalError(Json(AccessErrorResponse::new(
            "An error occurred while connecting to the device",
        )))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            Self::InvalidDeviceId(json) => json.0.message.clone(),
            Self::DeviceNotFound(json) => json.0.message.clone(),
            Self::DeviceOffline(json) => json.0.message.clone(),
            Self::AccessDenied(json) => json.0.message.clone(),
            Self::NotConnected(json) => json.0.message.clone(),
            Self::Unauthorized(json) => json.0.message.clone(),
            Self::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for DeviceAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<crate::services::access_service::ConnectError> for DeviceAccessError {
    fn from(err: crate::services::access_service::ConnectError) -> Self {
        use crate::services::access_service::ConnectError;
        match err {
            ConnectError::InvalidDeviceId => Self::invalid_device_id(),
            ConnectError::DeviceNotFound => Self::device_not_found(),
            ConnectError::DeviceOffline => Self::device_offline(),
            ConnectError::AccessDenied => Self::access_denied(),
            ConnectError::Storage(e) => {
                // Details stay in the log; the client gets the generic body
                tracing::error!("Storage failure during connect decision: {}", e);
                Self::internal_error()
            }
        }
    }
}

impl From<crate::services::access_service::DisconnectError> for DeviceAccessError {
    fn from(err: crate::services::access_service::DisconnectError) -> Self {
        use crate::services::access_service::DisconnectError;
        match err {
            DisconnectError::InvalidDeviceId => Self::invalid_device_id(),
            DisconnectError::NotConnected => Self::not_connected(),
        }
    }
}
