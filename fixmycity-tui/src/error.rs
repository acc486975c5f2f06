//! Error types for fixmycity-tui
//!
//! Provides TUI-specific error types that wrap service layer errors
//! and terminal/IO errors for unified error handling.

use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    /// Service layer error
    #[error("Service error: {0}")]
    Service(#[from] libfixmycity::FixMyCityError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Application state error
    #[error("Application error: {0}")]
    Application(String),
}

impl TuiError {
    /// Exit code for the binary, following the service layer's mapping
    pub fn exit_code(&self) -> i32 {
        match self {
            TuiError::Service(e) => e.exit_code(),
            TuiError::Terminal(_) | TuiError::Application(_) => 1,
        }
    }
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use libfixmycity::error::AuthError;

    #[test]
    fn test_exit_code_passes_through_service_errors() {
        let error: TuiError = libfixmycity::FixMyCityError::from(AuthError::InvalidCredentials).into();
        assert_eq!(error.exit_code(), 2);

        let error = TuiError::Application("runtime".to_string());
        assert_eq!(error.exit_code(), 1);
    }
}
