use thiserror::Error;

/// Failure raised by a remote capability.
///
/// The reconciler treats every remote failure the same way; `status` is kept
/// for logs and notices only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("remote operation failed: {message}")]
pub struct RemoteError {
    message: String,
    status: Option<u16>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// The remote failed and rollback was disabled for this call.
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// No entity matched the key and the call asked for a strict match.
    #[error("no entity matches {key}")]
    TargetNotFound { key: String },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("jobs client: {0}")]
    Client(#[from] RemoteError),
    #[error("async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
