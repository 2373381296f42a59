use crate::application::ports::WsError;
use crate::shared::error::AppError;
use thiserror::Error;

/// Reasons a sync attempt is rejected.
///
/// Conflicts and server rejections during upload are not errors: they end up
/// as warnings in the sync result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("{0}")]
    Blocked(String),
    #[error("{0}")]
    Offline(String),
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Server error: {0}")]
    Remote(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SyncError {
    /// Whether the same attempt may succeed later without user action.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SyncError::Blocked(_) | SyncError::Offline(_) | SyncError::Transport(_)
        )
    }
}

impl From<AppError> for SyncError {
    fn from(err: AppError) -> Self {
        SyncError::Storage(err.to_string())
    }
}

impl From<WsError> for SyncError {
    fn from(err: WsError) -> Self {
        match err {
            WsError::Rejected { message, .. } => SyncError::Remote(message),
            WsError::Transport(message) => SyncError::Transport(message),
        }
    }
}
