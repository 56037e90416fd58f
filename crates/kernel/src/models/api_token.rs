//! API tokens: the bearer credentials admin clients present per request.
//!
//! A token is 32 random bytes rendered as hex. The secret is handed out once
//! at issue time; only its SHA-256 digest is persisted.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

/// How long a resolved (or unknown) digest is served from memory.
const LOOKUP_TTL: Duration = Duration::from_secs(60);

/// Resolved tokens keyed by digest. Rows removed by a cascading user delete
/// stay here until the TTL runs out.
static LOOKUPS: LazyLock<moka::future::Cache<String, Option<ApiToken>>> = LazyLock::new(|| {
    moka::future::Cache::builder()
        .time_to_live(LOOKUP_TTL)
        .max_capacity(10_000)
        .build()
});

/// Stored token metadata. Never carries the secret.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApiToken {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    /// Operator-chosen label.
    pub name: String,
    #[serde(skip)]
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A freshly issued token together with its one-time secret.
#[derive(Debug)]
pub struct IssuedToken {
    pub token: ApiToken,
    pub secret: String,
}

impl ApiToken {
    /// Issue a token for `user_id`, optionally expiring at `expires_at`.
    pub async fn issue(
        pool: &PgPool,
        user_id: Uuid,
        name: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<IssuedToken> {
        let secret = hex::encode(rand::random::<[u8; 32]>());

        let token = sqlx::query_as::<_, ApiToken>(
            r#"
            INSERT INTO api_tokens (id, user_id, name, token_hash, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(user_id)
        .bind(name)
        .bind(digest(&secret))
        .bind(expires_at)
        .fetch_one(pool)
        .await
        .context("failed to issue API token")?;

        Ok(IssuedToken { token, secret })
    }

    /// Look up the token behind a bearer secret. `None` when unknown or expired.
    pub async fn resolve(pool: &PgPool, secret: &str) -> Result<Option<Self>> {
        let key = digest(secret);

        if let Some(hit) = LOOKUPS.get(&key).await {
            return Ok(hit.filter(|token| !token.is_expired(Utc::now())));
        }

        let found = sqlx::query_as::<_, ApiToken>(
            "SELECT * FROM api_tokens \
             WHERE token_hash = $1 AND (expires_at IS NULL OR expires_at > NOW())",
        )
        .bind(&key)
        .fetch_optional(pool)
        .await
        .context("failed to resolve API token")?;

        LOOKUPS.insert(key, found.clone()).await;
        Ok(found)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Record that the token was just presented.
    pub async fn mark_used(pool: &PgPool, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE api_tokens SET last_used = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to record API token use")?;
        Ok(())
    }

    /// Tokens owned by a user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>> {
        sqlx::query_as::<_, ApiToken>(
            "SELECT * FROM api_tokens WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .context("failed to list API tokens")
    }

    /// Delete a token and evict it from the lookup cache. `false` if unknown.
    pub async fn revoke(pool: &PgPool, id: Uuid) -> Result<bool> {
        let removed: Option<String> =
            sqlx::query_scalar("DELETE FROM api_tokens WHERE id = $1 RETURNING token_hash")
                .bind(id)
                .fetch_optional(pool)
                .await
                .context("failed to revoke API token")?;

        let Some(key) = removed else {
            return Ok(false);
        };
        LOOKUPS.invalidate(&key).await;
        Ok(true)
    }
}

/// Hex SHA-256 of a token secret.
fn digest(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}
