use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Alert not found: {0}")]
    NotFound(i32),

    #[error("Alert {id} cannot be resolved from status '{status}'")]
    NotResolvable { id: i32, status: String },

    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),
}
