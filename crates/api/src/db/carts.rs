//! Cart repository.
//!
//! Cart rows are keyed on (user, book); adding a book that is already in
//! the cart increments its quantity in a single upsert, so concurrent adds
//! cannot create duplicate rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use bookshelf_core::{BookId, UserId};

use super::{RepositoryError, parse_price};
use crate::models::{Book, CartItem};

/// Raw cart row joined with its book.
#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    quantity: i32,
    added_at: DateTime<Utc>,
    id: i32,
    title: String,
    author: String,
    description: String,
    language: String,
    price: Decimal,
    image_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CartItemRow> for CartItem {
    type Error = RepositoryError;

    fn try_from(r: CartItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            book: Book {
                id: BookId::new(r.id),
                title: r.title,
                author: r.author,
                description: r.description,
                language: r.language,
                price: parse_price(r.price)?,
                image_url: r.image_url,
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
            quantity: r.quantity,
            added_at: r.added_at,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a book to the user's cart, incrementing quantity on repeat.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the book doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        user_id: UserId,
        book_id: BookId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO cart_items (user_id, book_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, book_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            ",
        )
        .bind(user_id)
        .bind(book_id)
        .bind(quantity)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Remove a book from the user's cart.
    ///
    /// A no-op when the book was not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        book_id: BookId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// List the user's cart resolved to full books, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT c.quantity, c.added_at,
                   b.id, b.title, b.author, b.description, b.language, b.price,
                   b.image_url, b.created_at, b.updated_at
            FROM cart_items c
            JOIN books b ON b.id = c.book_id
            WHERE c.user_id = $1
            ORDER BY c.added_at ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartItem::try_from).collect()
    }
}
