use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::validate::PRICE_DECIMAL_PLACES;
use crate::database::models::{Product, User};

/// Public wire format of a product:
/// { id, name, description, price, created_at, updated_at }
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Always a string with two decimal places, e.g. "1500.00"
    pub price: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let mut price = product.price;
        price.rescale(PRICE_DECIMAL_PLACES);

        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: price.to_string(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Convert a list of products to their wire format, preserving order
pub fn products_to_views(products: &[Product]) -> Vec<ProductView> {
    products.iter().map(ProductView::from).collect()
}

/// What signup echoes back; the password never leaves the server
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub username: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::product;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn product_view_formats_price_with_two_places() {
        let now = product::now();
        let product = Product {
            id: 3,
            name: "Test Product".to_string(),
            description: None,
            price: Decimal::new(100, 0),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(ProductView::from(&product)).unwrap();
        assert_eq!(value["id"], json!(3));
        assert_eq!(value["price"], json!("100.00"));
        assert_eq!(value["description"], json!(null));
        assert_eq!(value["created_at"], value["updated_at"]);
    }

    #[test]
    fn user_view_has_no_password() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            username: "testuser".to_string(),
            password_hash: "$argon2id$...".to_string(),
            date_joined: Utc::now(),
        };
        let value = serde_json::to_value(UserView::from(&user)).unwrap();
        assert_eq!(value, json!({"username": "testuser"}));
    }
}
