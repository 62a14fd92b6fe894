//! Order and cart domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bookshelf_core::{OrderId, OrderStatus, UserId, Username};

use super::Book;

/// A cart row resolved to its book.
#[derive(Debug, Clone, Serialize)]
pub struct CartItem {
    /// The book in the cart.
    pub book: Book,
    /// How many copies. Always positive; adding an already-carted book
    /// increments this instead of creating a second row.
    pub quantity: i32,
    /// When the book was first added to the cart.
    pub added_at: DateTime<Utc>,
}

/// An order as seen by its owner.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The ordered book, resolved.
    pub book: Book,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

/// An order as seen by admins: includes who placed it.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithUser {
    /// Unique order ID.
    pub id: OrderId,
    /// ID of the user who placed the order.
    pub user_id: UserId,
    /// Username of the user who placed the order.
    pub username: Username,
    /// The ordered book, resolved.
    pub book: Book,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}
