use crate::errors::internal::{DeviceError, InternalError};
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for device endpoints
#[derive(Object, Debug)]
pub struct DeviceErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Device API error types
#[derive(ApiResponse, Debug)]
pub enum DeviceApiError {
    /// Device not found
    #[oai(status = 404)]
    NotFound(Json<DeviceErrorResponse>),

    /// MAC address already registered
    #[oai(status = 409)]
    DuplicateMacAddress(Json<DeviceErrorResponse>),

    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthorized(Json<DeviceErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<DeviceErrorResponse>),
}

impl DeviceApiError {
    pub fn not_found(id: i32) -> Self {
        DeviceApiError::NotFound(Json(DeviceErrorResponse {
            error: "device_not_found".to_string(),
            message: format!("Device not found: {}", id),
            status_code: 404,
        }))
    }

    pub fn duplicate_mac_address(mac: &str) -> Self {
        DeviceApiError::DuplicateMacAddress(Json(DeviceErrorResponse {
            error: "duplicate_mac_address".to_string(),
            message: format!("MAC address already registered: {}", mac),
            status_code: 409,
        }))
    }

    pub fn unauthorized() -> Self {
        DeviceApiError::Unauthorized(Json(DeviceErrorResponse {
            error: "unauthorized".to_string(),
            message: "Authentication required".to_string(),
            status_code: 401,
        }))
    }

    /// Convert InternalError to DeviceApiError
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Device(DeviceError::NotFound(id)) => Self::not_found(*id),
            InternalError::Device(DeviceError::DuplicateMacAddress(mac)) => {
                Self::duplicate_mac_address(mac)
            }
            _ => {
                tracing::error!("Unexpected error in device operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn internal_server_error() -> Self {
        DeviceApiError::InternalError(Json(DeviceErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            DeviceApiError::NotFound(json) => json.0.message.clone(),
            DeviceApiError::DuplicateMacAddress(json) => json.0.message.clone(),
            DeviceApiError::Unauthorized(json) => json.0.message.clone(),
            DeviceApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for DeviceApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
