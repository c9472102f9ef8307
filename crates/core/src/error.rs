#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend '{backend}' linkage check failed: {reason}")]
    BackendQuery {
        backend: &'static str,
        reason: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
