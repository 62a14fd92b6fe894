//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST /api/v1/auth/sign-up        - Register a new account
//! POST /api/v1/auth/sign-in        - Login, returns a bearer token
//! GET  /api/v1/auth/me             - Current user profile
//!
//! # Books (catalogue is public, writes are admin-only)
//! GET    /api/v1/books             - Full catalogue, newest first
//! GET    /api/v1/books/recent      - Four most recent books
//! GET    /api/v1/books/{id}        - Single book
//! POST   /api/v1/books             - Add a book (admin)
//! PUT    /api/v1/books/{id}        - Update a book (admin)
//! DELETE /api/v1/books/{id}        - Remove a book (admin)
//!
//! # Favourites (per-user)
//! GET    /api/v1/favourites            - List favourite books
//! PUT    /api/v1/favourites/{book_id}  - Add to favourites
//! DELETE /api/v1/favourites/{book_id}  - Remove from favourites
//!
//! # Cart (per-user)
//! GET    /api/v1/cart              - List cart contents
//! PUT    /api/v1/cart/{book_id}    - Add a book to the cart
//! DELETE /api/v1/cart/{book_id}    - Remove a book from the cart
//!
//! # Orders
//! POST /api/v1/orders              - Place orders from the cart
//! GET  /api/v1/orders              - Own order history
//! GET  /api/v1/orders/all          - All orders (admin)
//! PUT  /api/v1/orders/{id}/status  - Update order status (admin)
//! ```

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

pub mod auth;
pub mod books;
pub mod cart;
pub mod favourites;
pub mod orders;

/// Assemble the versioned API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/me", get(auth::me))
        // Books
        .route("/books", get(books::list).post(books::create))
        .route("/books/recent", get(books::list_recent))
        .route(
            "/books/{id}",
            get(books::get_one).put(books::update).delete(books::delete),
        )
        // Favourites
        .route("/favourites", get(favourites::list))
        .route(
            "/favourites/{book_id}",
            put(favourites::add).delete(favourites::remove),
        )
        // Cart
        .route("/cart", get(cart::list))
        .route("/cart/{book_id}", put(cart::add).delete(cart::remove))
        // Orders
        .route("/orders", post(orders::place).get(orders::history))
        .route("/orders/all", get(orders::list_all))
        .route("/orders/{id}/status", put(orders::update_status))
}
