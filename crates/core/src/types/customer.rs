//! Customer record and request payload.

use serde::{Deserialize, Serialize};

use super::id::CustomerId;
use crate::validation::{FieldKind, FieldSpec, LoadedFields, Payload, Schema, ValidationErrors};

/// Request schema for creating or replacing a customer.
///
/// `customer_id` is output-only and therefore not declared; sending it is an
/// unknown-field error.
pub const CUSTOMER_SCHEMA: Schema = Schema::new(
    "customer",
    &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("email", FieldKind::String),
        FieldSpec::required("phone", FieldKind::String),
    ],
);

/// A stored customer.
///
/// Field order matches the serialized listing shape
/// `{name, email, phone, customer_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub customer_id: CustomerId,
}

/// Validated customer fields for an insert or full-row update.
///
/// Email format and uniqueness are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerInput {
    /// Attach a store-generated id, producing the stored record.
    #[must_use]
    pub fn into_customer(self, customer_id: CustomerId) -> Customer {
        Customer {
            name: self.name,
            email: self.email,
            phone: self.phone,
            customer_id,
        }
    }
}

impl Payload for CustomerInput {
    fn from_fields(mut fields: LoadedFields) -> Result<Self, ValidationErrors> {
        Ok(Self {
            name: fields.require_string("name")?,
            email: fields.require_string("email")?,
            phone: fields.require_string("phone")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::{MISSING_FIELD, UNKNOWN_FIELD};

    #[test]
    fn test_load_customer() {
        let input: CustomerInput = CUSTOMER_SCHEMA
            .load_as(&json!({"name": "Ada", "email": "ada@x.com", "phone": "555-0100"}))
            .unwrap();

        assert_eq!(
            input,
            CustomerInput {
                name: "Ada".to_string(),
                email: "ada@x.com".to_string(),
                phone: "555-0100".to_string(),
            }
        );
    }

    #[test]
    fn test_email_format_is_not_checked() {
        let input: CustomerInput = CUSTOMER_SCHEMA
            .load_as(&json!({"name": "Ada", "email": "not-an-email", "phone": "x"}))
            .unwrap();
        assert_eq!(input.email, "not-an-email");
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let errors = CUSTOMER_SCHEMA
            .load_as::<CustomerInput>(&json!({"name": "Ada"}))
            .unwrap_err();

        assert_eq!(errors.get("email").unwrap(), [MISSING_FIELD]);
        assert_eq!(errors.get("phone").unwrap(), [MISSING_FIELD]);
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_customer_id_is_output_only() {
        let errors = CUSTOMER_SCHEMA
            .load_as::<CustomerInput>(&json!({
                "name": "Ada",
                "email": "ada@x.com",
                "phone": "555-0100",
                "customer_id": 9
            }))
            .unwrap_err();
        assert_eq!(errors.get("customer_id").unwrap(), [UNKNOWN_FIELD]);
    }

    #[test]
    fn test_customer_serialization_shape() {
        let customer = CustomerInput {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            phone: "555-0100".to_string(),
        }
        .into_customer(CustomerId::new(1));

        let json = serde_json::to_string(&customer).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Ada","email":"ada@x.com","phone":"555-0100","customer_id":1}"#
        );
    }
}
