//! Seed the database with sample customers and orders.
//!
//! Each sample customer gets one order dated today. Rows go through the same
//! store operations the API uses, so the seeded data is shaped exactly like
//! API-created data.

use chrono::Utc;

use backoffice_admin::db::{Gateway, PgGateway};
use backoffice_core::{CustomerInput, OrderInput};

use super::{CommandError, database_url};

const SAMPLE_NAMES: &[&str] = &["Ada", "Grace", "Edsger", "Barbara", "Donald"];

/// Build the `index`-th sample customer. Names cycle through a fixed list.
fn sample_customer(index: usize) -> CustomerInput {
    let name = SAMPLE_NAMES
        .get(index % SAMPLE_NAMES.len())
        .copied()
        .unwrap_or("Sample");
    CustomerInput {
        name: format!("{name} {}", index + 1),
        email: format!("{}.{}@example.com", name.to_lowercase(), index + 1),
        phone: format!("555-{:04}", 100 + index),
    }
}

/// Insert `count` customers, each with one order.
///
/// # Errors
///
/// Returns an error if the URL is missing or any insert fails.
pub async fn run(count: u8) -> Result<(), CommandError> {
    let gateway = PgGateway::new(&database_url()?)?;
    let mut session = gateway.open().await?;
    let today = Utc::now().date_naive();

    for index in 0..usize::from(count) {
        let customer = sample_customer(index);
        let customer_id = session.insert_customer(&customer).await?;
        let order_id = session
            .insert_order(&OrderInput {
                customer_id,
                date: today,
            })
            .await?;
        tracing::info!(%customer_id, %order_id, name = %customer.name, "Seeded customer");
    }

    session.close().await?;
    tracing::info!(count, "Seeding complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_customers_are_distinct() {
        let first = sample_customer(0);
        let sixth = sample_customer(5);

        assert_eq!(first.name, "Ada 1");
        assert_eq!(first.email, "ada.1@example.com");
        assert_eq!(first.phone, "555-0100");
        assert_eq!(sixth.name, "Ada 6");
        assert_ne!(first.email, sixth.email);
    }
}
