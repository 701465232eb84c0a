//! Order record and request payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::{CustomerId, OrderId};
use crate::validation::{FieldKind, FieldSpec, LoadedFields, Payload, Schema, ValidationErrors};

/// Request schema for creating or replacing an order.
///
/// The referenced customer is not looked up here; the store's foreign key
/// decides whether it exists.
pub const ORDER_SCHEMA: Schema = Schema::new(
    "order",
    &[
        FieldSpec::required("customer_id", FieldKind::Integer),
        FieldSpec::required("date", FieldKind::Date),
    ],
);

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub date: NaiveDate,
}

/// Validated order fields for an insert or full-row update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInput {
    pub customer_id: CustomerId,
    pub date: NaiveDate,
}

impl OrderInput {
    /// Attach a store-generated id, producing the stored record.
    #[must_use]
    pub const fn into_order(self, order_id: OrderId) -> Order {
        Order {
            order_id,
            customer_id: self.customer_id,
            date: self.date,
        }
    }
}

impl Payload for OrderInput {
    fn from_fields(mut fields: LoadedFields) -> Result<Self, ValidationErrors> {
        Ok(Self {
            customer_id: CustomerId::new(fields.require_integer("customer_id")?),
            date: fields.require_date("date")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::{INVALID_DATE, INVALID_INTEGER, MISSING_FIELD, UNKNOWN_FIELD};

    #[test]
    fn test_load_order() {
        let input: OrderInput = ORDER_SCHEMA
            .load_as(&json!({"customer_id": 1, "date": "2024-01-01"}))
            .unwrap();

        assert_eq!(input.customer_id, CustomerId::new(1));
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_invalid_order_fields() {
        let errors = ORDER_SCHEMA
            .load_as::<OrderInput>(&json!({"customer_id": "abc", "date": "01/02/2024"}))
            .unwrap_err();

        assert_eq!(errors.get("customer_id").unwrap(), [INVALID_INTEGER]);
        assert_eq!(errors.get("date").unwrap(), [INVALID_DATE]);
    }

    #[test]
    fn test_missing_date() {
        let errors = ORDER_SCHEMA
            .load_as::<OrderInput>(&json!({"customer_id": 1}))
            .unwrap_err();
        assert_eq!(errors.get("date").unwrap(), [MISSING_FIELD]);
    }

    #[test]
    fn test_order_id_is_output_only() {
        let errors = ORDER_SCHEMA
            .load_as::<OrderInput>(&json!({"order_id": 3, "customer_id": 1, "date": "2024-01-01"}))
            .unwrap_err();
        assert_eq!(errors.get("order_id").unwrap(), [UNKNOWN_FIELD]);
    }

    #[test]
    fn test_order_serialization_shape() {
        let order = OrderInput {
            customer_id: CustomerId::new(1),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
        .into_order(OrderId::new(10));

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            json!({"order_id": 10, "customer_id": 1, "date": "2024-01-01"})
        );
    }
}
