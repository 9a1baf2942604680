// Database entities (sea-orm models)
pub mod blocked_attempt;
pub mod device;
pub mod device_log;
pub mod security_alert;
pub mod user;
