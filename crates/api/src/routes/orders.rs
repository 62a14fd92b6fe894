//! Order placement, history and fulfilment handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bookshelf_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdmin, RequireAuth};
use crate::models::{Order, OrderWithUser};
use crate::state::AppState;

/// Response for a successful checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub message: &'static str,
    pub order_ids: Vec<OrderId>,
}

/// Payload for updating an order's status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: String,
}

/// Response for a successful status update.
#[derive(Debug, Serialize)]
pub struct StatusUpdatedResponse {
    pub message: &'static str,
    pub status: OrderStatus,
}

/// Place orders for everything in the caller's cart.
///
/// Each unit in the cart becomes its own order. The cart is emptied only
/// if every order was created, in one transaction.
#[instrument(skip(state))]
pub async fn place(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let order_ids = OrderRepository::new(state.pool())
        .place_from_cart(auth.id)
        .await?;

    if order_ids.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    tracing::info!(
        user_id = %auth.id,
        order_count = order_ids.len(),
        "Orders placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            message: "Order Placed Successfully",
            order_ids,
        }),
    ))
}

/// The caller's own order history, newest first.
#[instrument(skip(state))]
pub async fn history(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(auth.id)
        .await?;

    Ok(Json(orders))
}

/// Every order in the system, newest first.
#[instrument(skip(state))]
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderWithUser>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;

    Ok(Json(orders))
}

/// Move an order to a new fulfilment status.
///
/// Only forward transitions are allowed: a delivered or canceled order
/// can never change again, and delivery cannot be skipped. The write is
/// conditional on the status the transition was checked against, so
/// concurrent updates cannot sneak an illegal edge through.
#[instrument(skip(state, payload))]
pub async fn update_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<StatusUpdatedResponse>> {
    let next: OrderStatus = payload
        .status
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown order status: {}", payload.status)))?;

    let repo = OrderRepository::new(state.pool());

    let current = repo
        .get_status(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if !current.can_transition_to(next) {
        return Err(AppError::Conflict(format!(
            "cannot move order from {current} to {next}"
        )));
    }

    repo.update_status(id, current, next).await?;

    tracing::info!(order_id = %id, from = %current, to = %next, "Order status updated");

    Ok(Json(StatusUpdatedResponse {
        message: "Status Updated Successfully",
        status: next,
    }))
}
