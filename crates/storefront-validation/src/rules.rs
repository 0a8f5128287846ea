//! Ordered field check
//!
//! Rules run in a fixed order and the first failing rule decides the
//! message:
//!
//! 1. required
//! 2. empty optional fields pass without further checks
//! 3. minimum length
//! 4. maximum length
//! 5. pattern
//! 6. email shape
//! 7. confirmation
//!
//! A field that is too short and also fails its pattern therefore reports
//! the length problem.

use crate::constraints::{FieldConstraints, FieldKind};
use crate::email::is_valid_email;
use crate::error::FieldError;
use crate::string::{at_least, at_most, matches_pattern};

/// A passing check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every declared constraint holds
    Valid,
    /// Optional field left blank; nothing else was checked
    EmptyOptional,
}

/// Check a field value against its constraints.
///
/// `value` is the control's raw value; it is trimmed here. `confirm_value`
/// is the current raw value of the field named by `data-confirm`, or `None`
/// when there is no such field, in which case the confirmation rule is
/// skipped.
pub fn check_field(
    constraints: &FieldConstraints,
    value: &str,
    confirm_value: Option<&str>,
) -> Result<Verdict, FieldError> {
    let value = value.trim();
    let label = || constraints.label.clone();

    if value.is_empty() {
        return if constraints.required {
            Err(FieldError::Required { label: label() })
        } else {
            Ok(Verdict::EmptyOptional)
        };
    }

    if !at_least(value, constraints.min_length) {
        return Err(FieldError::TooShort {
            label: label(),
            min: constraints.min_length,
        });
    }

    if let Some(max) = constraints.max_length {
        if !at_most(value, max) {
            return Err(FieldError::TooLong { label: label(), max });
        }
    }

    if let Some(pattern) = &constraints.pattern {
        if !matches_pattern(value, pattern) {
            return Err(FieldError::PatternMismatch {
                label: label(),
                custom: constraints.pattern_message.clone(),
            });
        }
    }

    if constraints.kind == FieldKind::Email && !is_valid_email(value) {
        return Err(FieldError::InvalidEmail);
    }

    if constraints.confirm.is_some() {
        if let Some(expected) = confirm_value {
            if expected != value {
                return Err(FieldError::ConfirmationMismatch);
            }
        }
    }

    Ok(Verdict::Valid)
}
