//! Per-user favourites handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use bookshelf_core::BookId;

use crate::db::UserRepository;
use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::models::Book;
use crate::state::AppState;

/// Message body for favourites mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Add a book to the caller's favourites.
///
/// Adding a book that is already a favourite is not an error; the response
/// message tells the two cases apart.
#[instrument(skip(state))]
pub async fn add(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(book_id): Path<BookId>,
) -> Result<Json<MessageResponse>> {
    let inserted = UserRepository::new(state.pool())
        .add_favourite(auth.id, book_id)
        .await?;

    let message = if inserted {
        "Book Added Favourites"
    } else {
        "Book is Already in Favourites"
    };

    Ok(Json(MessageResponse { message }))
}

/// Remove a book from the caller's favourites.
///
/// Removing a book that is not a favourite succeeds as a no-op.
#[instrument(skip(state))]
pub async fn remove(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(book_id): Path<BookId>,
) -> Result<Json<MessageResponse>> {
    UserRepository::new(state.pool())
        .remove_favourite(auth.id, book_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Book Removed from Favourites",
    }))
}

/// List the caller's favourite books, oldest favourite first.
#[instrument(skip(state))]
pub async fn list(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Book>>> {
    let books = UserRepository::new(state.pool())
        .list_favourites(auth.id)
        .await?;

    Ok(Json(books))
}
