//! Error types for the shared crate
//!
//! Client-side validation failures. These never reach the backend: a
//! failing rule blocks step advancement or submission until the user
//! corrects the offending field.

use std::borrow::Cow;

use thiserror::Error;

use crate::models::DraftField;

/// A single violated form rule
///
/// Only the first failing rule of a check is ever reported, so this is a
/// struct rather than a collection. `Display` yields the human-readable
/// message alone, ready for a snackbar or status line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Field the rule is attached to
    pub field: DraftField,
    /// Human-readable message
    pub message: Cow<'static, str>,
}

impl ValidationError {
    /// Create an error with a static message
    pub const fn new(field: DraftField, message: &'static str) -> Self {
        Self {
            field,
            message: Cow::Borrowed(message),
        }
    }

    /// Create an error with a formatted message
    pub fn with_message(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: Cow::Owned(message.into()),
        }
    }

    /// "<Label> is required"
    pub fn required(field: DraftField) -> Self {
        Self::with_message(field, format!("{} is required", field.label()))
    }
}

/// A field name that is not part of the employee form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown form field: {0}")]
pub struct UnknownField(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message_only() {
        let err = ValidationError::new(DraftField::Pincode, "Pincode must be 6 digits");
        assert_eq!(err.to_string(), "Pincode must be 6 digits");
        assert_eq!(err.field, DraftField::Pincode);
    }

    #[test]
    fn test_required_uses_label() {
        let err = ValidationError::required(DraftField::AddressLine1);
        assert_eq!(err.to_string(), "Address Line 1 is required");
    }

    #[test]
    fn test_unknown_field_display() {
        let err = UnknownField("salary".to_string());
        assert_eq!(err.to_string(), "Unknown form field: salary");
    }
}
