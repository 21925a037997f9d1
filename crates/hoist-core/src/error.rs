use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("required tool not found: {0}")]
    ToolMissing(String),

    #[error("not authenticated with the hosting provider: {0}")]
    AuthUnavailable(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("rejected by the remote host: {0}")]
    NetworkOrRemoteRejected(String),

    #[error("local repository conflict: {0}")]
    LocalStateConflict(String),

    #[error("unexpected failure: {0}")]
    Unknown(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// Stable classification of a failure, exposed to callers in `SyncResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ToolMissing,
    AuthUnavailable,
    InvalidInput,
    NetworkOrRemoteRejected,
    LocalStateConflict,
    Unknown,
}

impl ErrorKind {
    /// Actionable next step for the user, rendered by front ends on failure.
    pub fn hint(&self) -> &'static str {
        match self {
            ErrorKind::ToolMissing => "install the GitHub CLI (gh) and git, then retry",
            ErrorKind::AuthUnavailable => "run 'gh auth login' and retry",
            ErrorKind::InvalidInput => "check the repository name and options",
            ErrorKind::NetworkOrRemoteRejected => {
                "check the repository name for collisions and your network connection"
            }
            ErrorKind::LocalStateConflict => "resolve the conflict in the working directory",
            ErrorKind::Unknown => "inspect the underlying tool output",
        }
    }
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::ToolMissing(_) => ErrorKind::ToolMissing,
            SyncError::AuthUnavailable(_) => ErrorKind::AuthUnavailable,
            SyncError::InvalidInput(_) => ErrorKind::InvalidInput,
            SyncError::NetworkOrRemoteRejected(_) => ErrorKind::NetworkOrRemoteRejected,
            SyncError::LocalStateConflict(_) => ErrorKind::LocalStateConflict,
            SyncError::Unknown(_) => ErrorKind::Unknown,
            SyncError::Io(_) | SyncError::Yaml(_) | SyncError::Json(_) => ErrorKind::Unknown,
        }
    }
}
