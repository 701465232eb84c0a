//! Declarative payload validation.
//!
//! A [`Schema`] is an immutable list of [`FieldSpec`]s, each naming a field,
//! its semantic [`FieldKind`] and whether it is required. Loading a JSON
//! payload against a schema either yields every declared value converted to
//! its kind, or the complete set of field-level failures. Nothing is returned
//! partially, so a caller can never act on a half-valid payload.
//!
//! Schemas are `const` values; there is no validator state to share or mutate.
//!
//! ```rust
//! use backoffice_core::{CUSTOMER_SCHEMA, CustomerInput};
//! use serde_json::json;
//!
//! let input: CustomerInput = CUSTOMER_SCHEMA
//!     .load_as(&json!({"name": "Ada", "email": "ada@x.com", "phone": "555-0100"}))
//!     .unwrap();
//! assert_eq!(input.name, "Ada");
//!
//! let errors = CUSTOMER_SCHEMA
//!     .load_as::<CustomerInput>(&json!({"name": "Ada"}))
//!     .unwrap_err();
//! assert!(errors.get("email").is_some());
//! ```

mod errors;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};

pub use errors::{
    EMPTY_STRING, INVALID_DATE, INVALID_INPUT_TYPE, INVALID_INTEGER, INVALID_STRING,
    MISSING_FIELD, NULL_FIELD, SCHEMA_KEY, UNKNOWN_FIELD, ValidationErrors,
};

/// Wire format for date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Semantic type of a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A non-empty JSON string.
    String,
    /// A 32-bit signed integer. JSON integers, integral floats and decimal
    /// strings are accepted.
    Integer,
    /// An ISO-8601 calendar date (`YYYY-MM-DD`).
    Date,
}

/// Declaration of one payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    /// Declare a field that must be present.
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// Declare a field that may be omitted.
    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    fn convert(&self, value: &Value) -> Result<FieldValue, &'static str> {
        match self.kind {
            FieldKind::String => convert_string(value),
            FieldKind::Integer => convert_integer(value).map(FieldValue::Integer),
            FieldKind::Date => convert_date(value).map(FieldValue::Date),
        }
    }
}

/// A converted field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Integer(i32),
    Date(NaiveDate),
}

/// Values produced by a successful [`Schema::load`], keyed by field name.
///
/// Optional fields that were omitted are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedFields(BTreeMap<&'static str, FieldValue>);

impl LoadedFields {
    /// Remove and return a string field.
    pub fn take_string(&mut self, name: &str) -> Option<String> {
        match self.0.remove(name)? {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Remove and return an integer field.
    pub fn take_integer(&mut self, name: &str) -> Option<i32> {
        match self.0.remove(name)? {
            FieldValue::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Remove and return a date field.
    pub fn take_date(&mut self, name: &str) -> Option<NaiveDate> {
        match self.0.remove(name)? {
            FieldValue::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Remove and return a required string field.
    ///
    /// # Errors
    ///
    /// Returns a missing-field error if the value is absent.
    pub fn require_string(&mut self, name: &str) -> Result<String, ValidationErrors> {
        self.take_string(name)
            .ok_or_else(|| ValidationErrors::single(name, MISSING_FIELD))
    }

    /// Remove and return a required integer field.
    ///
    /// # Errors
    ///
    /// Returns a missing-field error if the value is absent.
    pub fn require_integer(&mut self, name: &str) -> Result<i32, ValidationErrors> {
        self.take_integer(name)
            .ok_or_else(|| ValidationErrors::single(name, MISSING_FIELD))
    }

    /// Remove and return a required date field.
    ///
    /// # Errors
    ///
    /// Returns a missing-field error if the value is absent.
    pub fn require_date(&mut self, name: &str) -> Result<NaiveDate, ValidationErrors> {
        self.take_date(name)
            .ok_or_else(|| ValidationErrors::single(name, MISSING_FIELD))
    }

    /// Number of loaded values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A typed request payload that can be built from loaded fields.
pub trait Payload: Sized {
    /// Build the payload from the values of a successful load.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` if a value the payload needs is absent.
    fn from_fields(fields: LoadedFields) -> Result<Self, ValidationErrors>;
}

/// Immutable description of a request payload.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    name: &'static str,
    fields: &'static [FieldSpec],
}

impl Schema {
    /// Create a schema from a static field list.
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    /// Schema name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    fn declares(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.name == key)
    }

    /// Validate `payload` and convert every declared field.
    ///
    /// # Errors
    ///
    /// Returns every failure found: a non-object body, missing required
    /// fields, `null` values, wrong types and undeclared keys.
    pub fn load(&self, payload: &Value) -> Result<LoadedFields, ValidationErrors> {
        let Some(object) = payload.as_object() else {
            return Err(ValidationErrors::invalid_input());
        };

        let mut errors = ValidationErrors::new();
        let mut loaded = BTreeMap::new();

        for spec in self.fields {
            match object.get(spec.name) {
                None if spec.required => errors.add(spec.name, MISSING_FIELD),
                None => {}
                Some(Value::Null) => errors.add(spec.name, NULL_FIELD),
                Some(value) => match spec.convert(value) {
                    Ok(converted) => {
                        loaded.insert(spec.name, converted);
                    }
                    Err(message) => errors.add(spec.name, message),
                },
            }
        }

        self.reject_unknown(object, &mut errors);

        errors.into_result()?;
        Ok(LoadedFields(loaded))
    }

    /// Validate `payload` and build a typed [`Payload`] from it.
    ///
    /// # Errors
    ///
    /// Returns the same failures as [`Schema::load`].
    pub fn load_as<P: Payload>(&self, payload: &Value) -> Result<P, ValidationErrors> {
        self.load(payload).and_then(P::from_fields)
    }

    fn reject_unknown(&self, object: &Map<String, Value>, errors: &mut ValidationErrors) {
        for key in object.keys().filter(|k| !self.declares(k)) {
            errors.add(key, UNKNOWN_FIELD);
        }
    }
}

fn convert_string(value: &Value) -> Result<FieldValue, &'static str> {
    match value {
        Value::String(s) if s.is_empty() => Err(EMPTY_STRING),
        Value::String(s) => Ok(FieldValue::String(s.clone())),
        _ => Err(INVALID_STRING),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn convert_integer(value: &Value) -> Result<i32, &'static str> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i).map_err(|_| INVALID_INTEGER);
            }
            match n.as_f64() {
                Some(f)
                    if f.fract() == 0.0
                        && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&f) =>
                {
                    Ok(f as i32)
                }
                _ => Err(INVALID_INTEGER),
            }
        }
        Value::String(s) => s.trim().parse::<i32>().map_err(|_| INVALID_INTEGER),
        _ => Err(INVALID_INTEGER),
    }
}

fn convert_date(value: &Value) -> Result<NaiveDate, &'static str> {
    match value {
        Value::String(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| INVALID_DATE),
        _ => Err(INVALID_DATE),
    }
}
