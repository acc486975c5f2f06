//! Input validation service
//!
//! Live validation of free-text fields while the user types, using the same
//! rule the engine and draft flow enforce on submit: text must be non-empty
//! after trimming.

use crate::engine::require_text;
use crate::error::FixMyCityError;

/// Which free-text field is being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Description,
    Comment,
}

impl TextField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Comment => "Comment",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationRequest {
    pub field: TextField,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResponse {
    /// Whether the content would be accepted on submit
    pub valid: bool,
    pub errors: Vec<String>,
    /// Characters (not bytes) in the trimmed content
    pub char_count: usize,
}

/// Stateless validator shared by every front end
#[derive(Debug, Clone, Default)]
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, request: ValidationRequest) -> ValidationResponse {
        let char_count = request.content.trim().chars().count();
        match require_text(&request.content, request.field.label()) {
            Ok(_) => ValidationResponse {
                valid: true,
                errors: Vec::new(),
                char_count,
            },
            Err(e) => ValidationResponse {
                valid: false,
                errors: vec![match e {
                    FixMyCityError::Validation(reason) => reason,
                    other => other.to_string(),
                }],
                char_count,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_description_is_invalid() {
        let service = ValidationService::new();

        let response = service.validate(ValidationRequest {
            field: TextField::Description,
            content: "   ".to_string(),
        });

        assert!(!response.valid);
        assert_eq!(response.char_count, 0);
        assert_eq!(
            response.errors,
            vec!["Description cannot be empty".to_string()]
        );
    }

    #[test]
    fn test_valid_comment() {
        let service = ValidationService::new();

        let response = service.validate(ValidationRequest {
            field: TextField::Comment,
            content: " fixed yesterday ".to_string(),
        });

        assert!(response.valid);
        assert!(response.errors.is_empty());
        assert_eq!(response.char_count, 15);
    }

    #[test]
    fn test_char_count_is_unicode_aware() {
        let service = ValidationService::new();

        let response = service.validate(ValidationRequest {
            field: TextField::Description,
            content: "गड्ढा 🚧".to_string(),
        });

        assert!(response.valid);
        assert_eq!(response.char_count, "गड्ढा 🚧".chars().count());
    }
}
