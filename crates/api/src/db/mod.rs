//! Database operations for the Bookshelf `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Accounts, argon2id password hashes, roles
//! - `books` - The catalog (admin-managed)
//! - `favourites` - User-to-book membership, keyed on the pair
//! - `cart_items` - Quantity-aware cart rows, keyed on the pair
//! - `orders` - One row per ordered book, never deleted
//!
//! Queries are runtime-checked (`query_as`/`query`) so the workspace builds
//! without a live database; row structs derive `FromRow` and are converted
//! to domain types at the repository boundary.
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and are embedded in the
//! binary via [`MIGRATOR`]. Run them with:
//! ```bash
//! cargo run -p bookshelf-cli -- migrate
//! ```

pub mod books;
pub mod carts;
pub mod orders;
pub mod users;

pub use books::BookRepository;
pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Embedded migrations for the Bookshelf schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors returned by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username, ordered book).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Validate a stored price amount.
///
/// The `CHECK (price >= 0)` column constraint makes a negative amount
/// unreachable through this crate; anything else wrote it.
pub(crate) fn parse_price(
    amount: rust_decimal::Decimal,
) -> Result<bookshelf_core::Price, RepositoryError> {
    bookshelf_core::Price::parse(amount)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid price in database: {e}")))
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
