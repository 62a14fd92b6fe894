//! Domain types for the API.
//!
//! These are validated, database-independent representations; repositories
//! convert raw rows into them and handlers serialize them to JSON.

pub mod book;
pub mod order;
pub mod user;

pub use book::Book;
pub use order::{CartItem, Order, OrderWithUser};
pub use user::User;
