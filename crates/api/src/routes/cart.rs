//! Per-user cart handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bookshelf_core::BookId;

use crate::db::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::CartItem;
use crate::state::AppState;

/// Optional body for adding to the cart.
///
/// The body may be omitted entirely, in which case one copy is added.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartPayload {
    pub quantity: Option<i32>,
}

/// Message body for cart mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Add a book to the caller's cart.
///
/// Adding a book already in the cart increases its quantity.
#[instrument(skip(state, payload))]
pub async fn add(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(book_id): Path<BookId>,
    payload: Option<Json<AddToCartPayload>>,
) -> Result<Json<MessageResponse>> {
    let quantity = payload.and_then(|Json(p)| p.quantity).unwrap_or(1);

    if quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    CartRepository::new(state.pool())
        .add_item(auth.id, book_id, quantity)
        .await?;

    Ok(Json(MessageResponse {
        message: "Book Added to Cart",
    }))
}

/// Remove a book from the caller's cart.
///
/// Removes the whole cart line regardless of quantity; removing a book
/// that is not in the cart succeeds as a no-op.
#[instrument(skip(state))]
pub async fn remove(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(book_id): Path<BookId>,
) -> Result<Json<MessageResponse>> {
    CartRepository::new(state.pool())
        .remove_item(auth.id, book_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Book Removed from Cart",
    }))
}

/// List the caller's cart, in the order items were added.
#[instrument(skip(state))]
pub async fn list(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartItem>>> {
    let items = CartRepository::new(state.pool()).list(auth.id).await?;

    Ok(Json(items))
}
