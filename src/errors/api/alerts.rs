use crate::errors::internal::{AlertError, InternalError};
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for alert endpoints
#[derive(Object, Debug)]
pub struct AlertErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Alert API error types
#[derive(ApiResponse, Debug)]
pub enum AlertApiError {
    /// Alert not found
    #[oai(status = 404)]
    NotFound(Json<AlertErrorResponse>),

    /// Severity value outside the closed set
    #[oai(status = 400)]
    InvalidSeverity(Json<AlertErrorResponse>),

    /// Status value outside the closed set
    #[oai(status = 400)]
    InvalidStatus(Json<AlertErrorResponse>),

    /// Alert is not in a resolvable state
    #[oai(status = 409)]
    NotResolvable(Json<AlertErrorResponse>),

    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthorized(Json<AlertErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AlertErrorResponse>),
}

impl AlertApiError {
    pub fn not_found(id: i32) -> Self {
        AlertApiError::NotFound(Json(AlertErrorResponse {
            error: "alert_not_found".to_string(),
            message: format!("Alert not found: {}", id),
            status_code: 404,
        }))
    }

    pub fn invalid_severity(value: &str) -> Self {
        AlertApiError::InvalidSeverity(Json(AlertErrorResponse {
            error: "invalid_severity".to_string(),
            message: format!(
                "Invalid severity '{}'. Expected one of: low, medium, high, critical",
                value
            ),
            status_code: 400,
        }))
    }

    pub fn invalid_status(value: &str) -> Self {
        AlertApiError::InvalidStatus(Json(AlertErrorResponse {
            error: "invalid_status".to_string(),
            message: format!(
                "Invalid status '{}'. Expected one of: active, investigating, resolved, false_positive",
                value
            ),
            status_code: 400,
        }))
    }

    pub fn unauthorized() -> Self {
        AlertApiError::Unauthorized(Json(AlertErrorResponse {
            error: "unauthorized".to_string(),
            message: "Authentication required".to_string(),
            status_code: 401,
        }))
    }

    pub fn not_resolvable(id: i32, status: &str) -> Self {
        AlertApiError::NotResolvable(Json(AlertErrorResponse {
            error: "alert_not_resolvable".to_string(),
            message: format!("Alert {} cannot be resolved from status '{}'", id, status),
            status_code: 409,
        }))
    }

    /// Convert InternalError to AlertApiError
    ///
    /// This is the explicit conversion point from internal errors to API
    /// errors. Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Alert(AlertError::NotFound(id)) => Self::not_found(*id),
            InternalError::Alert(AlertError::NotResolvable { id, status }) => {
                Self::not_resolvable(*id, status)
            }
            InternalError::Alert(AlertError::InvalidSeverity(value)) => {
                Self::invalid_severity(value)
            }
            _ => {
                tracing::error!("Unexpected error in alert operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn internal_server_error() -> Self {
        AlertApiError::InternalError(Json(AlertErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AlertApiError::NotFound(json) => json.0.message.clone(),
            AlertApiError::InvalidSeverity(json) => json.0.message.clone(),
            AlertApiError::InvalidStatus(json) => json.0.message.clone(),
            AlertApiError::NotResolvable(json) => json.0.message.clone(),
            AlertApiError::Unauthorized(json) => json.0.message.clone(),
            AlertApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AlertApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
