use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
