use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Device not found: {0}")]
    NotFound(i32),

    #[error("MAC address already registered: {0}")]
    DuplicateMacAddress(String),
}
