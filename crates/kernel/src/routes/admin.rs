//! Admin back-office routes: dashboard stats and user management.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::helpers::{DataResponse, MessageResponse, parse_id};
use crate::auth::AdminUser;
use crate::error::{AppError, AppResult, ResultExt};
use crate::models::{Order, Product, RecentOrder, Role, User};
use crate::state::AppState;

const USER_NOT_FOUND: &str = "User not found";

/// Orders shown on the dashboard.
const RECENT_ORDER_COUNT: i64 = 5;

#[derive(Debug, Serialize)]
struct DashboardStats {
    users: i64,
    products: i64,
    orders: i64,
    revenue: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    success: bool,
    stats: DashboardStats,
    recent_orders: Vec<RecentOrder>,
}

#[derive(Debug, Deserialize)]
struct RoleUpdate {
    role: String,
}

/// Create the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/stats", get(dashboard_stats))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{id}", delete(delete_user))
        .route("/api/admin/users/{id}/role", put(update_user_role))
}

/// Store totals and the most recent orders.
async fn dashboard_stats(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<StatsResponse>> {
    let db = state.db();

    let (users, products, orders, revenue, recent_orders) = tokio::try_join!(
        User::count(db),
        Product::count(db),
        Order::count(db),
        Order::completed_revenue(db),
        Order::recent(db, RECENT_ORDER_COUNT),
    )
    .or_internal("Error fetching stats")?;

    Ok(Json(StatsResponse {
        success: true,
        stats: DashboardStats {
            users,
            products,
            orders,
            revenue,
        },
        recent_orders,
    }))
}

/// All accounts, newest first.
async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = User::list(state.db())
        .await
        .or_internal("Error fetching users")?;

    Ok(Json(DataResponse::new(users)))
}

/// Delete an account.
async fn delete_user(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, USER_NOT_FOUND)?;

    if id == admin.user().id {
        return Err(AppError::bad_request(
            "Error deleting user",
            "administrators cannot delete their own account",
        ));
    }

    let deleted = User::delete(state.db(), id)
        .await
        .or_internal("Error deleting user")?;
    if !deleted {
        return Err(AppError::NotFound(USER_NOT_FOUND));
    }

    info!(admin_id = %admin.user().id, user_id = %id, "user deleted");

    Ok(Json(MessageResponse::new("User removed")))
}

/// Change an account's role.
async fn update_user_role(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RoleUpdate>, JsonRejection>,
) -> AppResult<Json<DataResponse<User>>> {
    let id = parse_id(&id, USER_NOT_FOUND)?;
    let Json(update) =
        body.map_err(|e| AppError::bad_request("Error updating user role", e.body_text()))?;

    let role = update
        .role
        .parse::<Role>()
        .map_err(|e| AppError::bad_request("Error updating user role", e.to_string()))?;

    let user = User::update_role(state.db(), id, role)
        .await
        .or_internal("Error updating user role")?
        .ok_or(AppError::NotFound(USER_NOT_FOUND))?;

    info!(admin_id = %admin.user().id, user_id = %id, role = %role, "user role updated");

    Ok(Json(DataResponse::new(user)))
}
