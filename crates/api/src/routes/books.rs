//! Book catalogue handlers.
//!
//! Reads are public; writes require the `admin` role.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use bookshelf_core::{BookId, Price};

use crate::db::books::{BookFields, BookRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdmin;
use crate::models::Book;
use crate::state::AppState;

/// How many books `/books/recent` returns.
const RECENT_BOOKS_LIMIT: i64 = 4;

/// Payload for creating or updating a book.
#[derive(Debug, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub description: String,
    pub language: String,
    pub price: Decimal,
    pub image_url: String,
}

impl BookPayload {
    /// Check field constraints and borrow the payload as repository fields.
    fn validate(&self) -> Result<BookFields<'_>> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title must not be empty".to_string()));
        }
        if self.author.trim().is_empty() {
            return Err(AppError::BadRequest("author must not be empty".to_string()));
        }
        let price = Price::parse(self.price).map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(BookFields {
            title: &self.title,
            author: &self.author,
            description: &self.description,
            language: &self.language,
            price,
            image_url: &self.image_url,
        })
    }
}

/// Full catalogue, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Book>>> {
    let books = BookRepository::new(state.pool()).list().await?;
    Ok(Json(books))
}

/// The most recently added books.
#[instrument(skip(state))]
pub async fn list_recent(State(state): State<AppState>) -> Result<Json<Vec<Book>>> {
    let books = BookRepository::new(state.pool())
        .list_recent(RECENT_BOOKS_LIMIT)
        .await?;
    Ok(Json(books))
}

/// Single book by id.
#[instrument(skip(state))]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> Result<Json<Book>> {
    let book = BookRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {id}")))?;

    Ok(Json(book))
}

/// Add a book to the catalogue.
#[instrument(skip(state, payload))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<BookPayload>,
) -> Result<impl IntoResponse> {
    let fields = payload.validate()?;
    let book = BookRepository::new(state.pool()).create(&fields).await?;

    tracing::info!(book_id = %book.id, title = %book.title, "Book added");

    Ok((StatusCode::CREATED, Json(book)))
}

/// Replace all fields of an existing book.
#[instrument(skip(state, payload))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<BookId>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<Book>> {
    let fields = payload.validate()?;
    let book = BookRepository::new(state.pool()).update(id, &fields).await?;

    Ok(Json(book))
}

/// Remove a book from the catalogue.
///
/// A book referenced by existing orders cannot be deleted; the request is
/// rejected with a conflict instead of leaving orders pointing nowhere.
#[instrument(skip(state))]
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> Result<StatusCode> {
    BookRepository::new(state.pool()).delete(id).await?;

    tracing::info!(book_id = %id, "Book removed");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payload(price: Decimal) -> BookPayload {
        BookPayload {
            title: "The Name of the Wind".to_string(),
            author: "Patrick Rothfuss".to_string(),
            description: "A legend recounts his own story.".to_string(),
            language: "English".to_string(),
            price,
            image_url: "https://covers.example.com/notw.jpg".to_string(),
        }
    }

    #[test]
    fn test_valid_payload_accepted() {
        let p = payload(Decimal::new(1499, 2));
        let fields = p.validate().unwrap();
        assert_eq!(fields.title, "The Name of the Wind");
        assert_eq!(fields.price.amount(), Decimal::new(1499, 2));
    }

    #[test]
    fn test_negative_price_rejected() {
        let p = payload(Decimal::new(-100, 2));
        assert!(matches!(p.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut p = payload(Decimal::new(1499, 2));
        p.title = "   ".to_string();
        assert!(matches!(p.validate(), Err(AppError::BadRequest(_))));
    }
}
