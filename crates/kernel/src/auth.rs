//! Request-scoped admin credentials.
//!
//! Handlers that mutate the catalog or read the back-office take an
//! [`AdminUser`] parameter. The extractor resolves the request's
//! `Authorization: Bearer <token>` header against stored API tokens; no
//! credential is held anywhere between requests.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use crate::error::{AppError, ResultExt};
use crate::models::{ApiToken, User};
use crate::state::AppState;

/// An authenticated administrator.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl AdminUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

/// Raw token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let raw_token = bearer_token(&parts.headers)
            .ok_or(AppError::Unauthorized("Not authorized, no token"))?;

        let token = ApiToken::resolve(state.db(), raw_token)
            .await
            .or_internal("Error verifying token")?
            .ok_or_else(|| {
                debug!("unknown or expired API token");
                AppError::Unauthorized("Not authorized, token failed")
            })?;

        let user = User::find_by_id(state.db(), token.user_id)
            .await
            .or_internal("Error verifying token")?
            .ok_or(AppError::Unauthorized("Not authorized, user not found"))?;

        if !user.is_admin() {
            debug!(user_id = %user.id, "non-admin token on admin route");
            return Err(AppError::Forbidden("Not authorized as an admin"));
        }

        // Update last_used in background
        let pool = state.db().clone();
        let token_id = token.id;
        tokio::spawn(async move {
            if let Err(e) = ApiToken::mark_used(&pool, token_id).await {
                tracing::warn!(error = %e, "failed to update API token last_used");
            }
        });

        Ok(AdminUser(user))
    }
}
