//! Shared domain types.

pub mod id;
pub mod price;
pub mod status;
pub mod username;

pub use id::{BookId, OrderId, UserId};
pub use price::{Price, PriceError};
pub use status::{OrderStatus, Role};
pub use username::{Username, UsernameError};
