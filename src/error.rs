use reqwest::StatusCode;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Command requires a logged-in session
    #[error("Not logged in. Run `cnc-admin login` first")]
    NotAuthenticated,

    /// Backend returned a non-success status
    #[error("Backend error ({status}): {message}")]
    Backend { status: StatusCode, message: String },

    /// Record not found on the backend
    #[error("Not found: {0}")]
    NotFound(String),

    /// Line item quantity must be at least 1
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Session state file error
    #[error("Session state error: {0}")]
    SessionError(String),

    /// HTTP request error (preserves reqwest::Error for diagnostics)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::NotFound("order 64af".to_string());
        assert_eq!(error.to_string(), "Not found: order 64af");
    }

    #[test]
    fn test_invalid_quantity_display() {
        let error = AppError::InvalidQuantity(0);
        assert_eq!(error.to_string(), "Invalid quantity: 0");
    }

    #[test]
    fn test_backend_display_includes_status() {
        let error = AppError::Backend {
            status: StatusCode::BAD_GATEWAY,
            message: "upstream down".to_string(),
        };
        assert!(error.to_string().contains("502"));
        assert!(error.to_string().contains("upstream down"));
    }
}
