//! FitHub test utilities.
//!
//! Product fixture builders that render the JSON bodies the admin API
//! accepts, plus assertion helpers for JSON responses.

use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

/// Create a test product with default values.
///
/// Category and brand default to values unique to this fixture so that
/// tests sharing a database do not see each other's rows.
pub fn test_product(name: &str) -> TestProduct {
    let tag = Uuid::now_v7().simple().to_string();
    TestProduct {
        name: name.to_string(),
        description: format!("{name} for everyday training"),
        category: format!("category-{tag}"),
        brand: format!("brand-{tag}"),
        price: "10.00".to_string(),
        stock: 10,
        images: vec![],
        featured: false,
        rating: 0.0,
    }
}

/// A unique label for grouping fixtures, e.g. `cardio-0190...`.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7().simple())
}

/// A product builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    /// Decimal price as text, e.g. `"149.99"`.
    pub price: String,
    pub stock: i32,
    pub images: Vec<String>,
    pub featured: bool,
    pub rating: f64,
}

impl TestProduct {
    /// Set the category.
    pub fn in_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set the brand.
    pub fn by_brand(mut self, brand: &str) -> Self {
        self.brand = brand.to_string();
        self
    }

    /// Set the description.
    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the price from its decimal text.
    pub fn priced(mut self, price: &str) -> Self {
        self.price = price.to_string();
        self
    }

    /// Set units on hand.
    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    /// Add an image URL.
    pub fn with_image(mut self, url: &str) -> Self {
        self.images.push(url.to_string());
        self
    }

    /// Mark as featured.
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Set the rating.
    pub fn rated(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Render the `POST /api/products` body.
    ///
    /// The price is sent as a JSON number.
    pub fn to_json(&self) -> JsonValue {
        let price: JsonValue = self
            .price
            .parse::<serde_json::Number>()
            .map(JsonValue::Number)
            .unwrap_or_else(|_| JsonValue::String(self.price.clone()));

        json!({
            "name": self.name,
            "description": self.description,
            "category": self.category,
            "brand": self.brand,
            "price": price,
            "stock": self.stock,
            "images": self.images,
            "featured": self.featured,
            "rating": self.rating,
        })
    }
}

/// Assertion helpers for JSON responses.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert the storefront failure envelope: `success: false` and a message.
    pub fn failure(value: &Value) {
        assert_eq!(
            value["success"],
            Value::Bool(false),
            "Expected a failure envelope, got: {value}"
        );
        assert!(
            value["message"].is_string(),
            "Expected a failure message, got: {value}"
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = test_product("Kalenjin Running Shoes")
            .in_category("running")
            .by_brand("Stride")
            .priced("129.99")
            .featured()
            .rated(4.5)
            .with_image("https://cdn.example.com/shoe.jpg");

        assert_eq!(product.category, "running");
        assert_eq!(product.brand, "Stride");
        assert!(product.featured);
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn fixtures_get_distinct_groups() {
        let a = test_product("A");
        let b = test_product("B");
        assert_ne!(a.category, b.category);
        assert_ne!(a.brand, b.brand);
        assert_ne!(unique("cardio"), unique("cardio"));
    }

    #[test]
    fn json_body_uses_numeric_price() {
        let body = test_product("Jump Rope").priced("149.5").to_json();
        assert!(body["price"].is_number());
        assert_eq!(body["price"].as_f64().unwrap(), 149.5);
        assert_eq!(body["name"], "Jump Rope");
        assert_eq!(body["stock"], 10);
    }

    #[test]
    fn test_assertions() {
        let json = serde_json::json!({"success": false, "message": "Product not found"});
        assert::has_key(&json, "message");
        assert::failure(&json);
        assert::contains("hello world", "world");
    }
}
