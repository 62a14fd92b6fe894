//! Order repository.
//!
//! Orders are append-only: checkout creates them and admins move their
//! status along the lifecycle; nothing ever deletes one.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use bookshelf_core::{BookId, OrderId, OrderStatus, UserId, Username};

use super::{RepositoryError, parse_price};
use crate::models::{Book, Order, OrderWithUser};

/// Raw order row joined with its book.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    book_id: i32,
    title: String,
    author: String,
    description: String,
    language: String,
    price: Decimal,
    image_url: String,
    book_created_at: DateTime<Utc>,
    book_updated_at: DateTime<Utc>,
}

/// Raw order row joined with its book and owner.
#[derive(Debug, sqlx::FromRow)]
struct OrderWithUserRow {
    id: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: i32,
    username: String,
    book_id: i32,
    title: String,
    author: String,
    description: String,
    language: String,
    price: Decimal,
    image_url: String,
    book_created_at: DateTime<Utc>,
    book_updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<OrderStatus, RepositoryError> {
    OrderStatus::from_str(s)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid status in database: {e}")))
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::new(r.id),
            book: Book {
                id: BookId::new(r.book_id),
                title: r.title,
                author: r.author,
                description: r.description,
                language: r.language,
                price: parse_price(r.price)?,
                image_url: r.image_url,
                created_at: r.book_created_at,
                updated_at: r.book_updated_at,
            },
            status: parse_status(&r.status)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

impl TryFrom<OrderWithUserRow> for OrderWithUser {
    type Error = RepositoryError;

    fn try_from(r: OrderWithUserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&r.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(r.id),
            user_id: UserId::new(r.user_id),
            username,
            book: Book {
                id: BookId::new(r.book_id),
                title: r.title,
                author: r.author,
                description: r.description,
                language: r.language,
                price: parse_price(r.price)?,
                image_url: r.image_url,
                created_at: r.book_created_at,
                updated_at: r.book_updated_at,
            },
            status: parse_status(&r.status)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Checkout: convert every cart row into orders and clear the cart,
    /// atomically. A cart row with quantity N becomes N order rows.
    ///
    /// Returns the IDs of the created orders; an empty vec means the cart
    /// was empty and nothing was written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back and the cart is untouched.
    pub async fn place_from_cart(&self, user_id: UserId) -> Result<Vec<OrderId>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        #[derive(sqlx::FromRow)]
        struct CreatedRow {
            id: i32,
        }

        let created = sqlx::query_as::<_, CreatedRow>(
            r"
            INSERT INTO orders (user_id, book_id)
            SELECT c.user_id, c.book_id
            FROM cart_items c
            CROSS JOIN LATERAL generate_series(1, c.quantity)
            WHERE c.user_id = $1
            RETURNING id
            ",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if created.is_empty() {
            // Nothing to order; leave the (empty) cart alone.
            return Ok(Vec::new());
        }

        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(created
            .into_iter()
            .map(|r| OrderId::new(r.id))
            .collect())
    }

    /// List a user's orders with resolved books, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT o.id, o.status, o.created_at, o.updated_at,
                   b.id AS book_id, b.title, b.author, b.description, b.language,
                   b.price, b.image_url,
                   b.created_at AS book_created_at, b.updated_at AS book_updated_at
            FROM orders o
            JOIN books b ON b.id = o.book_id
            WHERE o.user_id = $1
            ORDER BY o.created_at DESC, o.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// List every order with resolved book and owner, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored status or username is invalid.
    pub async fn list_all(&self) -> Result<Vec<OrderWithUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderWithUserRow>(
            r"
            SELECT o.id, o.status, o.created_at, o.updated_at,
                   u.id AS user_id, u.username,
                   b.id AS book_id, b.title, b.author, b.description, b.language,
                   b.price, b.image_url,
                   b.created_at AS book_created_at, b.updated_at AS book_updated_at
            FROM orders o
            JOIN users u ON u.id = o.user_id
            JOIN books b ON b.id = o.book_id
            ORDER BY o.created_at DESC, o.id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderWithUser::try_from).collect()
    }

    /// Get the current status of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored status is invalid.
    pub async fn get_status(&self, id: OrderId) -> Result<Option<OrderStatus>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct StatusRow {
            status: String,
        }

        let row = sqlx::query_as::<_, StatusRow>("SELECT status FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(|r| parse_status(&r.status)).transpose()
    }

    /// Move an order from one status to another.
    ///
    /// The write is conditional on the current status, so two updates
    /// racing on the same order cannot both apply; the loser sees a
    /// conflict. Transition legality is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Conflict` if the order is no longer in
    /// `from`.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE orders SET status = $1, updated_at = now() WHERE id = $2 AND status = $3",
        )
        .bind(to.as_str())
        .bind(id)
        .bind(from.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Orders are never deleted; distinguish a wrong id from a
            // status that moved underneath us.
            if self.get_status(id).await?.is_none() {
                return Err(RepositoryError::NotFound);
            }
            return Err(RepositoryError::Conflict(
                "order status changed concurrently".to_owned(),
            ));
        }

        Ok(())
    }
}
