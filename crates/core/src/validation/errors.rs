//! Field-level validation errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key used for errors that concern the payload as a whole.
pub const SCHEMA_KEY: &str = "_schema";

/// Message for a required field absent from the payload.
pub const MISSING_FIELD: &str = "Missing data for required field.";
/// Message for an explicit `null`.
pub const NULL_FIELD: &str = "Field may not be null.";
/// Message for a key the schema does not declare.
pub const UNKNOWN_FIELD: &str = "Unknown field.";
/// Message for a body that is not a JSON object.
pub const INVALID_INPUT_TYPE: &str = "Invalid input type.";
/// Message for an empty string field.
pub const EMPTY_STRING: &str = "Shorter than minimum length 1.";
/// Message for a value that is not a string.
pub const INVALID_STRING: &str = "Not a valid string.";
/// Message for a value that is not a 32-bit integer.
pub const INVALID_INTEGER: &str = "Not a valid integer.";
/// Message for a value that is not an ISO-8601 date.
pub const INVALID_DATE: &str = "Not a valid date.";

/// Aggregated validation failures: field name to the list of messages for it.
///
/// Serializes as the bare map so it can be returned verbatim as a 400 body:
///
/// ```json
/// {"email": ["Missing data for required field."], "phone": ["Not a valid string."]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("payload failed validation ({} field(s))", .0.len())]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error set with a single message for `field`.
    #[must_use]
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Create an error set describing a body that is not a JSON object.
    #[must_use]
    pub fn invalid_input() -> Self {
        Self::single(SCHEMA_KEY, INVALID_INPUT_TYPE)
    }

    /// Record a message against `field`.
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.to_owned());
    }

    /// Returns `true` if no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one failure.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded against `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Turn an accumulated error set into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns `self` if any failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_accumulate_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", MISSING_FIELD);
        errors.add("name", INVALID_STRING);
        errors.add("phone", NULL_FIELD);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name").unwrap().len(), 2);
        assert!(errors.get("email").is_none());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let errors = ValidationErrors::single("email", MISSING_FIELD);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email": ["Missing data for required field."]})
        );
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(ValidationErrors::invalid_input().into_result().is_err());
    }

    #[test]
    fn test_display() {
        let errors = ValidationErrors::invalid_input();
        assert_eq!(errors.to_string(), "payload failed validation (1 field(s))");
    }
}
