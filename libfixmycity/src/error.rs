//! Error types for FixMyCity

use thiserror::Error;

use crate::types::ReportId;

pub type Result<T> = std::result::Result<T, FixMyCityError>;

#[derive(Error, Debug)]
pub enum FixMyCityError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Report not found: {0}")]
    NotFound(ReportId),

    #[error("Report {0} already exists")]
    DuplicateId(ReportId),

    #[error("Comment index {index} out of range (report has {len} comments)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("This report has no location data.")]
    NoLocation,
}

impl FixMyCityError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FixMyCityError::Validation(_) => 3,
            FixMyCityError::Auth(_) => 2,
            FixMyCityError::Config(_)
            | FixMyCityError::Capability(_)
            | FixMyCityError::NotFound(_)
            | FixMyCityError::DuplicateId(_)
            | FixMyCityError::IndexOutOfRange { .. }
            | FixMyCityError::NoLocation => 1,
        }
    }

    /// Short heading for the alert shown to the user
    pub fn title(&self) -> &'static str {
        match self {
            FixMyCityError::Config(_) => "Configuration error",
            FixMyCityError::Capability(CapabilityError::PermissionDenied(_)) => "Permission denied",
            FixMyCityError::Capability(CapabilityError::Camera(_)) => "Camera error",
            FixMyCityError::Capability(CapabilityError::Location(_)) => "Location error",
            FixMyCityError::Auth(_) => "Login failed",
            FixMyCityError::Validation(_) => "Missing information",
            FixMyCityError::NotFound(_) => "Report not found",
            FixMyCityError::DuplicateId(_) => "Report not saved",
            FixMyCityError::IndexOutOfRange { .. } => "Comment not found",
            FixMyCityError::NoLocation => "No location",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Failures reported by device capabilities (camera, location)
///
/// A cancelled capture is not an error; adapters return `Ok(None)` for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Camera(String),

    #[error("{0}")]
    Location(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect credentials")]
    InvalidCredentials,

    #[error("Admin access required")]
    AdminRequired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_validation() {
        let error = FixMyCityError::Validation("Description cannot be empty".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_auth() {
        let error = FixMyCityError::Auth(AuthError::InvalidCredentials);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_other_errors() {
        assert_eq!(FixMyCityError::NoLocation.exit_code(), 1);
        assert_eq!(FixMyCityError::NotFound(ReportId::new(42)).exit_code(), 1);
        assert_eq!(
            FixMyCityError::IndexOutOfRange { index: 3, len: 1 }.exit_code(),
            1
        );
        let capability = FixMyCityError::Capability(CapabilityError::Camera("busy".to_string()));
        assert_eq!(capability.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_validation() {
        let error = FixMyCityError::Validation("Comment cannot be empty".to_string());
        assert_eq!(format!("{}", error), "Invalid input: Comment cannot be empty");
    }

    #[test]
    fn test_error_message_formatting_auth() {
        let error: FixMyCityError = AuthError::InvalidCredentials.into();
        assert_eq!(
            format!("{}", error),
            "Authentication error: Incorrect credentials"
        );
    }

    #[test]
    fn test_index_out_of_range_message() {
        let error = FixMyCityError::IndexOutOfRange { index: 5, len: 2 };
        let message = format!("{}", error);
        assert!(message.contains("5"));
        assert!(message.contains("2 comments"));
    }

    #[test]
    fn test_capability_titles_match_kind() {
        let denied: FixMyCityError =
            CapabilityError::PermissionDenied("Location permission is required".to_string()).into();
        assert_eq!(denied.title(), "Permission denied");

        let camera: FixMyCityError = CapabilityError::Camera("no device".to_string()).into();
        assert_eq!(camera.title(), "Camera error");

        let location: FixMyCityError = CapabilityError::Location("timeout".to_string()).into();
        assert_eq!(location.title(), "Location error");
    }

    #[test]
    fn test_error_conversion_from_config_error() {
        let config_error = ConfigError::MissingField("admin.username".to_string());
        let error: FixMyCityError = config_error.into();

        match error {
            FixMyCityError::Config(_) => {}
            _ => panic!("Expected FixMyCityError::Config"),
        }
    }

    #[test]
    fn test_capability_error_clone() {
        let original = CapabilityError::Location("GPS unavailable".to_string());
        let cloned = original.clone();
        assert_eq!(original, cloned);
    }
}
