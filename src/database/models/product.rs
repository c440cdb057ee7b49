use chrono::{DateTime, Duration, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A sellable item as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

/// Validated changes to an existing product. `None` leaves the field untouched;
/// `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
}

impl Product {
    /// Build a freshly created product; both timestamps share one instant.
    pub fn from_draft(id: i64, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply changes in place and move `updated_at` forward.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        self.updated_at = next_timestamp(self.updated_at);
    }
}

/// Current time at the precision Postgres stores (microseconds)
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A timestamp strictly after `previous`, normally the current time.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn laptop() -> Product {
        let draft = ProductDraft {
            name: "Laptop Pro".to_string(),
            description: Some("A powerful laptop".to_string()),
            price: Decimal::from_str("1500.00").unwrap(),
        };
        Product::from_draft(1, draft, now())
    }

    #[test]
    fn created_product_has_equal_timestamps() {
        let product = laptop();
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut product = laptop();
        let before = product.clone();

        product.apply(ProductChanges {
            price: Some(Decimal::from_str("1600.50").unwrap()),
            ..Default::default()
        });

        assert_eq!(product.name, before.name);
        assert_eq!(product.description, before.description);
        assert_eq!(product.price.to_string(), "1600.50");
        assert!(product.updated_at > before.updated_at);
        assert_eq!(product.created_at, before.created_at);
    }

    #[test]
    fn apply_can_clear_description() {
        let mut product = laptop();
        product.apply(ProductChanges {
            description: Some(None),
            ..Default::default()
        });
        assert!(product.description.is_none());
    }

    #[test]
    fn next_timestamp_is_strictly_later_even_for_future_input() {
        let future = Utc::now() + Duration::hours(1);
        assert!(next_timestamp(future) > future);
    }
}
