//! Validation error types

use thiserror::Error;

/// A field value that failed one of its constraints.
///
/// `Display` renders the message shown beneath the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{label} is required")]
    Required { label: String },

    #[error("{label} must be at least {min} characters")]
    TooShort { label: String, min: usize },

    #[error("{label} must be less than {max} characters")]
    TooLong { label: String, max: usize },

    #[error("{}", pattern_message(.label, .custom))]
    PatternMismatch {
        label: String,
        custom: Option<String>,
    },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Passwords do not match")]
    ConfirmationMismatch,
}

fn pattern_message(label: &str, custom: &Option<String>) -> String {
    match custom {
        Some(message) => message.clone(),
        None => format!("Please enter a valid {}", label.to_lowercase()),
    }
}

/// A constraint attribute that could not be turned into a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("{attribute}=\"{value}\" is not a non-negative integer")]
    InvalidLength { attribute: &'static str, value: String },

    #[error("pattern \"{pattern}\" does not compile: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
