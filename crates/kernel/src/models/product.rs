//! Product model and admin CRUD operations.
//!
//! Catalog reads with filters and paging live in [`crate::catalog`]; this
//! module owns single-row lookups and the administrative writes.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::ValidationError;

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// Product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUIDv7).
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub name: String,

    pub description: String,

    pub category: String,

    pub brand: String,

    /// Unit price, never negative.
    pub price: Decimal,

    /// Units on hand, never negative.
    pub stock: i32,

    /// Image URLs in display order.
    pub images: Vec<String>,

    pub featured: bool,

    /// Average review rating in `0..=5`; new products start at 0.
    pub rating: f64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub rating: f64,
}

/// Input for a partial product update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub rating: Option<f64>,
}

impl CreateProduct {
    /// Check schema constraints before insert.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;
        require_text("category", &self.category)?;
        require_text("brand", &self.brand)?;
        check_price(self.price)?;
        check_stock(self.stock)?;
        check_rating(self.rating)?;
        check_images(&self.images)
    }
}

impl UpdateProduct {
    /// Check schema constraints on the fields that are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref name) = self.name {
            require_text("name", name)?;
        }
        if let Some(ref description) = self.description {
            require_text("description", description)?;
        }
        if let Some(ref category) = self.category {
            require_text("category", category)?;
        }
        if let Some(ref brand) = self.brand {
            require_text("brand", brand)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(stock) = self.stock {
            check_stock(stock)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        if let Some(ref images) = self.images {
            check_images(images)?;
        }
        Ok(())
    }

    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.brand.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.images.is_none()
            && self.featured.is_none()
            && self.rating.is_none()
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{field} is required")));
    }
    reject_nul(field, value)
}

/// Postgres text columns cannot store NUL.
fn reject_nul(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::new(format!(
            "{field} must not contain NUL characters"
        )));
    }
    Ok(())
}

fn check_price(price: Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("price must be >= 0"));
    }
    Ok(())
}

fn check_stock(stock: i32) -> Result<(), ValidationError> {
    if stock < 0 {
        return Err(ValidationError::new("stock must be >= 0"));
    }
    Ok(())
}

fn check_rating(rating: f64) -> Result<(), ValidationError> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::new(format!(
            "rating must be between 0 and {MAX_RATING}"
        )));
    }
    Ok(())
}

fn check_images(images: &[String]) -> Result<(), ValidationError> {
    for image in images {
        reject_nul("images", image)?;
        let parsed = url::Url::parse(image)
            .map_err(|e| ValidationError::new(format!("invalid image URL '{image}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::new(format!(
                "image URL '{image}' must use http or https"
            )));
        }
    }
    Ok(())
}

impl Product {
    /// Whether any units are available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Find a product by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch product by id")?;

        Ok(product)
    }

    /// Create a new product.
    pub async fn create(pool: &PgPool, input: CreateProduct) -> Result<Self> {
        input.validate()?;

        let id = Uuid::now_v7();

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (id, name, description, category, brand, price, stock, images, featured, rating)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.category.trim())
        .bind(input.brand.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(&input.images)
        .bind(input.featured)
        .bind(input.rating)
        .fetch_one(pool)
        .await
        .context("failed to create product")?;

        Ok(product)
    }

    /// Apply a partial update. Returns `None` when the product does not exist.
    pub async fn update(pool: &PgPool, id: Uuid, input: UpdateProduct) -> Result<Option<Self>> {
        input.validate()?;

        if input.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let mut query = QueryBuilder::<Postgres>::new("UPDATE products SET ");
        {
            let mut set = query.separated(", ");
            if let Some(name) = input.name {
                set.push("name = ");
                set.push_bind_unseparated(name.trim().to_string());
            }
            if let Some(description) = input.description {
                set.push("description = ");
                set.push_bind_unseparated(description);
            }
            if let Some(category) = input.category {
                set.push("category = ");
                set.push_bind_unseparated(category.trim().to_string());
            }
            if let Some(brand) = input.brand {
                set.push("brand = ");
                set.push_bind_unseparated(brand.trim().to_string());
            }
            if let Some(price) = input.price {
                set.push("price = ");
                set.push_bind_unseparated(price);
            }
            if let Some(stock) = input.stock {
                set.push("stock = ");
                set.push_bind_unseparated(stock);
            }
            if let Some(images) = input.images {
                set.push("images = ");
                set.push_bind_unseparated(images);
            }
            if let Some(featured) = input.featured {
                set.push("featured = ");
                set.push_bind_unseparated(featured);
            }
            if let Some(rating) = input.rating {
                set.push("rating = ");
                set.push_bind_unseparated(rating);
            }
            set.push("updated_at = NOW()");
        }
        query.push(" WHERE id = ");
        query.push_bind(id);
        query.push(" RETURNING *");

        let product = query
            .build_query_as::<Product>()
            .fetch_optional(pool)
            .await
            .context("failed to update product")?;

        Ok(product)
    }

    /// Delete a product. Returns `false` when nothing was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete product")?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all products.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await
            .context("failed to count products")?;
        Ok(row.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn valid_input() -> CreateProduct {
        CreateProduct {
            name: "Kalenjin Running Shoes".to_string(),
            description: "Lightweight trainers".to_string(),
            category: "running".to_string(),
            brand: "Kalenjin".to_string(),
            price: Decimal::new(12999, 2),
            stock: 12,
            images: vec!["https://cdn.example.com/shoe.jpg".to_string()],
            featured: false,
            rating: 0.0,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn blank_name_rejected() {
        let input = CreateProduct {
            name: "   ".to_string(),
            ..valid_input()
        };
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::new("name is required")
        );
    }

    #[test]
    fn negative_price_rejected() {
        let input = CreateProduct {
            price: Decimal::new(-1, 2),
            ..valid_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn zero_price_allowed() {
        let input = CreateProduct {
            price: Decimal::ZERO,
            ..valid_input()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn negative_stock_rejected() {
        let input = CreateProduct {
            stock: -3,
            ..valid_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn rating_out_of_range_rejected() {
        for rating in [-0.5, 5.5, f64::NAN] {
            let input = CreateProduct {
                rating,
                ..valid_input()
            };
            assert!(input.validate().is_err(), "rating {rating} should fail");
        }
    }

    #[test]
    fn non_http_image_rejected() {
        let input = CreateProduct {
            images: vec!["ftp://example.com/a.png".to_string()],
            ..valid_input()
        };
        assert!(input.validate().is_err());

        let input = CreateProduct {
            images: vec!["not a url".to_string()],
            ..valid_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn nul_rejected_in_every_text_field() {
        let with_nul = |f: fn(&mut CreateProduct)| {
            let mut input = valid_input();
            f(&mut input);
            input.validate().unwrap_err().to_string()
        };

        assert!(with_nul(|p| p.name = "Nul\0Bar".to_string()).contains("name"));
        assert!(with_nul(|p| p.description = "trail\0".to_string()).contains("description"));
        assert!(with_nul(|p| p.category = "run\0".to_string()).contains("category"));
        assert!(with_nul(|p| p.brand = "\0Stride".to_string()).contains("brand"));
        assert!(
            with_nul(|p| p.images = vec!["https://cdn.example.com/a\0.jpg".to_string()])
                .contains("images")
        );

        let update = UpdateProduct {
            description: Some("soft\0foam".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn update_validates_only_present_fields() {
        let update = UpdateProduct {
            stock: Some(4),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
        assert!(!update.is_empty());

        let update = UpdateProduct {
            price: Some(Decimal::new(-500, 2)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn empty_update_detected() {
        assert!(UpdateProduct::default().is_empty());
    }

    #[test]
    fn create_input_deserializes_camel_case_with_defaults() {
        let json = r#"{
            "name": "Kettlebell 16kg",
            "description": "Cast iron",
            "category": "strength",
            "brand": "IronWorks",
            "price": 49.5
        }"#;
        let input: CreateProduct = serde_json::from_str(json).unwrap();
        assert_eq!(input.price, Decimal::new(495, 1));
        assert_eq!(input.stock, 0);
        assert!(input.images.is_empty());
        assert!(!input.featured);
        assert_eq!(input.rating, 0.0);
    }

    #[test]
    fn product_serializes_with_storefront_keys() {
        let product = Product {
            id: Uuid::nil(),
            name: "Yoga Mat".to_string(),
            description: "6mm".to_string(),
            category: "yoga".to_string(),
            brand: "Lotus".to_string(),
            price: Decimal::new(2500, 2),
            stock: 0,
            images: vec![],
            featured: true,
            rating: 4.5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["_id"], Uuid::nil().to_string());
        assert_eq!(json["price"], 25.0);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(!product.in_stock());
    }
}
