//! Order reads for the admin dashboard.
//!
//! Orders are written by checkout; this module only aggregates them.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Payment status that counts toward revenue.
pub const PAYMENT_COMPLETED: &str = "completed";

/// Order record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub total_amount: Decimal,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

/// Name and email of the customer who placed an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCustomer {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Recent order with its customer resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    #[serde(flatten)]
    pub order: Order,
    pub user: Option<OrderCustomer>,
}

#[derive(sqlx::FromRow)]
struct RecentOrderRow {
    id: Uuid,
    user_id: Option<Uuid>,
    total_amount: Decimal,
    payment_status: String,
    created_at: DateTime<Utc>,
    user_name: Option<String>,
    user_email: Option<String>,
}

impl From<RecentOrderRow> for RecentOrder {
    fn from(row: RecentOrderRow) -> Self {
        let user = match (row.user_id, row.user_name, row.user_email) {
            (Some(id), Some(name), Some(email)) => Some(OrderCustomer { id, name, email }),
            _ => None,
        };

        RecentOrder {
            order: Order {
                id: row.id,
                user_id: row.user_id,
                total_amount: row.total_amount,
                payment_status: row.payment_status,
                created_at: row.created_at,
            },
            user,
        }
    }
}

impl Order {
    /// Count all orders.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await
            .context("failed to count orders")?;
        Ok(row.0)
    }

    /// Sum of order totals whose payment completed.
    pub async fn completed_revenue(pool: &PgPool) -> Result<Decimal> {
        let row: (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total_amount), 0) FROM orders WHERE payment_status = $1",
        )
        .bind(PAYMENT_COMPLETED)
        .fetch_one(pool)
        .await
        .context("failed to sum completed revenue")?;
        Ok(row.0)
    }

    /// Most recent orders with customer name and email.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<RecentOrder>> {
        let rows = sqlx::query_as::<_, RecentOrderRow>(
            r#"
            SELECT o.id, o.user_id, o.total_amount, o.payment_status, o.created_at,
                   u.name AS user_name, u.email AS user_email
            FROM orders o
            LEFT JOIN users u ON u.id = o.user_id
            ORDER BY o.created_at DESC, o.id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .context("failed to fetch recent orders")?;

        Ok(rows.into_iter().map(RecentOrder::from).collect())
    }
}
