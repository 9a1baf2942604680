use poem_openapi::Object;

/// Response model for the health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Current server time (ISO 8601)
    pub timestamp: String,
}
