//! Book domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bookshelf_core::{BookId, Price};

/// A catalog entry (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    /// Unique book ID.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// Long-form description shown on the detail page.
    pub description: String,
    /// Language of the text.
    pub language: String,
    /// Non-negative price with two decimal places.
    pub price: Price,
    /// Cover image URL.
    pub image_url: String,
    /// When the book was added to the catalog.
    pub created_at: DateTime<Utc>,
    /// When the book was last edited.
    pub updated_at: DateTime<Utc>,
}
