//! Host capability errors.

use thiserror::Error;

/// Failures reported by a host tray or window manager.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Display failed: {0}")]
    DisplayFailed(String),

    #[error("Window unavailable: {0}")]
    WindowUnavailable(String),

    #[error("Open window failed: {0}")]
    OpenFailed(String),

    #[error("Unsupported by host: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_error() {
        let err = HostError::PermissionDenied;
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_display_failed_error() {
        let err = HostError::DisplayFailed("tray full".to_string());
        let display = err.to_string();
        assert!(display.contains("Display failed"));
        assert!(display.contains("tray full"));
    }

    #[test]
    fn test_window_unavailable_error() {
        let err = HostError::WindowUnavailable("w-1".to_string());
        assert!(err.to_string().contains("w-1"));
    }

    #[test]
    fn test_open_failed_error() {
        let err = HostError::OpenFailed("no browser".to_string());
        let display = err.to_string();
        assert!(display.contains("Open window failed"));
        assert!(display.contains("no browser"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "notify-send missing");
        let err = HostError::from(io_err);
        assert!(err.to_string().contains("notify-send missing"));
    }

    #[test]
    fn test_all_error_variants_display() {
        let errors: Vec<HostError> = vec![
            HostError::PermissionDenied,
            HostError::DisplayFailed("a".to_string()),
            HostError::WindowUnavailable("b".to_string()),
            HostError::OpenFailed("c".to_string()),
            HostError::Unsupported("d".to_string()),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
