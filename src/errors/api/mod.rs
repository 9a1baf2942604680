// API error layer - ApiResponse enums returned by endpoints
pub mod access;
pub mod alerts;
pub mod auth;
pub mod devices;

pub use access::DeviceAccessError;
pub use alerts::AlertApiError;
pub use auth::AuthError;
pub use devices::DeviceApiError;
