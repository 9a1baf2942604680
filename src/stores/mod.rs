// Stores layer - Data access and repository pattern
pub mod alert_store;
pub mod attempt_store;
pub mod credential_store;
pub mod device_log_store;
pub mod device_store;

pub use alert_store::AlertStore;
pub use attempt_store::AttemptStore;
pub use credential_store::CredentialStore;
pub use device_log_store::DeviceLogStore;
pub use device_store::DeviceStore;
