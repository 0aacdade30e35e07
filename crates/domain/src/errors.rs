use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid caller address: {0}")]
    InvalidCallerAddress(String),

    #[error("Block list query failed: {0}")]
    BlockCheckFailed(String),

    #[error("Directory query failed: {0}")]
    DirectoryQueryFailed(String),

    #[error("Contact photo load failed: {0}")]
    PhotoLoadFailed(String),

    #[error("Call screening service unavailable: {0}")]
    ScreeningServiceUnavailable(String),

    #[error("Failed to bind call screening service {component}")]
    ScreeningBindFailed { component: String },

    #[error("Call screening service {component} faulted: {reason}")]
    ScreeningRemoteFault { component: String, reason: String },

    #[error("Resource not found: {0}")]
    NotFound(String),
}
