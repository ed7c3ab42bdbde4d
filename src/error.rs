//! ALFA Media Gate - Error Types

use thiserror::Error;

use crate::capability::Capability;

/// Result type for media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Media acquisition error types
#[derive(Error, Debug)]
pub enum MediaError {
    // ═══════════════════════════════════════════════════════════════
    // PERMISSION ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Permission denied: {0}")]
    PermissionDenied(Capability),

    #[error("Permission permanently denied: {0} (enable it under App settings)")]
    PermissionPermanentlyDenied(Capability),

    // ═══════════════════════════════════════════════════════════════
    // ACTIVITY ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Activity launch failed: {0}")]
    ActivityLaunchFailed(String),

    #[error("Operation cancelled")]
    OperationCancelled,

    #[error("Invalid result payload: {0}")]
    InvalidResultPayload(String),

    // ═══════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Image fetch failed: {0}")]
    FetchFailed(String),

    #[error("Image encoding failed: {0}")]
    EncodeFailed(String),

    // ═══════════════════════════════════════════════════════════════
    // LOCAL ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MediaError {
    /// Check if this error should surface as a transient notice
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            MediaError::PermissionDenied(_)
                | MediaError::PermissionPermanentlyDenied(_)
                | MediaError::InvalidResultPayload(_)
                | MediaError::FetchFailed(_)
        )
    }

    /// Check if this error is swallowed without any UI change
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            MediaError::OperationCancelled | MediaError::ActivityLaunchFailed(_)
        )
    }
}

impl From<serde_json::Error> for MediaError {
    fn from(e: serde_json::Error) -> Self {
        MediaError::ConfigError(e.to_string())
    }
}

impl From<reqwest::Error> for MediaError {
    fn from(e: reqwest::Error) -> Self {
        MediaError::FetchFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(MediaError::PermissionDenied(Capability::Camera).is_user_visible());
        assert!(MediaError::FetchFailed("boom".into()).is_user_visible());
        assert!(MediaError::OperationCancelled.is_silent());
        assert!(MediaError::ActivityLaunchFailed("no settings".into()).is_silent());
        assert!(!MediaError::OperationCancelled.is_user_visible());
        assert!(MediaError::PermissionPermanentlyDenied(Capability::ReadStorage).is_user_visible());
    }
}
