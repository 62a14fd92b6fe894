//! Book repository for catalog database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use bookshelf_core::{BookId, Price};

use super::{RepositoryError, parse_price};
use crate::models::Book;

/// Raw `books` row.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BookRow {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub description: String,
    pub language: String,
    pub price: Decimal,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = RepositoryError;

    fn try_from(r: BookRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BookId::new(r.id),
            title: r.title,
            author: r.author,
            description: r.description,
            language: r.language,
            price: parse_price(r.price)?,
            image_url: r.image_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Fields for creating or replacing a book.
#[derive(Debug)]
pub struct BookFields<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub description: &'a str,
    pub language: &'a str,
    pub price: Price,
    pub image_url: &'a str,
}

/// Repository for book database operations.
pub struct BookRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepository<'a> {
    /// Create a new book repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r"
            SELECT id, title, author, description, language, price, image_url,
                   created_at, updated_at
            FROM books
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Book::try_from).collect()
    }

    /// List the `limit` most recently added books.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Book>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r"
            SELECT id, title, author, description, language, price, image_url,
                   created_at, updated_at
            FROM books
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Book::try_from).collect()
    }

    /// Get a book by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let row = sqlx::query_as::<_, BookRow>(
            r"
            SELECT id, title, author, description, language, price, image_url,
                   created_at, updated_at
            FROM books
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Book::try_from).transpose()
    }

    /// Create a new book.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, fields: &BookFields<'_>) -> Result<Book, RepositoryError> {
        let row = sqlx::query_as::<_, BookRow>(
            r"
            INSERT INTO books (title, author, description, language, price, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, author, description, language, price, image_url,
                      created_at, updated_at
            ",
        )
        .bind(fields.title)
        .bind(fields.author)
        .bind(fields.description)
        .bind(fields.language)
        .bind(fields.price.amount())
        .bind(fields.image_url)
        .fetch_one(self.pool)
        .await?;

        Book::try_from(row)
    }

    /// Replace all editable fields of a book.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the book doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: BookId,
        fields: &BookFields<'_>,
    ) -> Result<Book, RepositoryError> {
        let row = sqlx::query_as::<_, BookRow>(
            r"
            UPDATE books
            SET title = $1, author = $2, description = $3, language = $4,
                price = $5, image_url = $6, updated_at = now()
            WHERE id = $7
            RETURNING id, title, author, description, language, price, image_url,
                      created_at, updated_at
            ",
        )
        .bind(fields.title)
        .bind(fields.author)
        .bind(fields.description)
        .bind(fields.language)
        .bind(fields.price.amount())
        .bind(fields.image_url)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Book::try_from)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a book.
    ///
    /// Favourite and cart references cascade; order references do not,
    /// so a book that has ever been ordered cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the book doesn't exist.
    /// Returns `RepositoryError::Conflict` if orders reference the book.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: BookId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "book has existing orders and cannot be deleted".to_owned(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
