//! Storefront accounts.
//!
//! Registration and login belong to the auth subsystem. Here accounts are
//! listed and managed from the back-office, and operator accounts are
//! provisioned from the CLI.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::Role;

/// An account as the back-office sees it. Holds no secrets.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Fields for provisioning an account.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to load user")
    }

    /// Emails are matched exactly.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .context("failed to load user by email")
    }

    /// Insert an account. A duplicate email fails with a unique violation.
    pub async fn create(pool: &PgPool, input: CreateUser) -> Result<Self> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, role) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(input.name.trim())
        .bind(input.email.trim())
        .bind(input.role.as_str())
        .fetch_one(pool)
        .await
        .with_context(|| format!("failed to create user {}", input.email))
    }

    /// Every account, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC, id")
            .fetch_all(pool)
            .await
            .context("failed to list users")
    }

    /// `None` when no account has this id.
    pub async fn update_role(pool: &PgPool, id: Uuid, role: Role) -> Result<Option<Self>> {
        sqlx::query_as::<_, User>("UPDATE users SET role = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(role.as_str())
            .fetch_optional(pool)
            .await
            .context("failed to change user role")
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .context("failed to count users")
    }

    /// Remove an account; its API tokens go with it. `false` if unknown.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let removed = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete user")?
            .rows_affected();
        Ok(removed > 0)
    }
}
