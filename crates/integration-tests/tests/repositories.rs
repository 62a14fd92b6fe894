//! Repository tests against a real database.
//!
//! Each test gets its own freshly migrated database via `#[sqlx::test]`;
//! see the crate docs for the required `DATABASE_URL`.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use sqlx::PgPool;

use bookshelf_api::db::books::{BookFields, BookRepository};
use bookshelf_api::db::{CartRepository, OrderRepository, RepositoryError, UserRepository};
use bookshelf_core::{BookId, OrderStatus, Price, Role, UserId, Username};

/// Insert a user directly; repository tests don't need a real hash.
async fn seed_user(pool: &PgPool, name: &str) -> UserId {
    let username = Username::parse(name).unwrap();
    UserRepository::new(pool)
        .create(&username, "$argon2id$unused", Role::User)
        .await
        .unwrap()
        .id
}

async fn seed_book(pool: &PgPool, title: &str) -> BookId {
    BookRepository::new(pool)
        .create(&BookFields {
            title,
            author: "Author",
            description: "Description",
            language: "English",
            price: Price::parse(Decimal::new(1999, 2)).unwrap(),
            image_url: "https://covers.example.com/book.jpg",
        })
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "../api/migrations")]
async fn favourite_is_stored_once_across_repeat_adds(pool: PgPool) {
    let user = seed_user(&pool, "reader").await;
    let book = seed_book(&pool, "Dune").await;
    let repo = UserRepository::new(&pool);

    // First add inserts, second is a no-op and reports so.
    assert!(repo.add_favourite(user, book).await.unwrap());
    assert!(!repo.add_favourite(user, book).await.unwrap());

    let favourites = repo.list_favourites(user).await.unwrap();
    assert_eq!(favourites.len(), 1);
    assert_eq!(favourites.first().unwrap().id, book);

    repo.remove_favourite(user, book).await.unwrap();
    assert!(repo.list_favourites(user).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../api/migrations")]
async fn removing_absent_favourite_succeeds(pool: PgPool) {
    let user = seed_user(&pool, "reader").await;
    let book = seed_book(&pool, "Dune").await;
    let repo = UserRepository::new(&pool);

    repo.remove_favourite(user, book).await.unwrap();
    assert!(repo.list_favourites(user).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../api/migrations")]
async fn favouriting_unknown_book_is_not_found(pool: PgPool) {
    let user = seed_user(&pool, "reader").await;

    let result = UserRepository::new(&pool)
        .add_favourite(user, BookId::new(9999))
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[sqlx::test(migrations = "../api/migrations")]
async fn checkout_expands_quantities_and_clears_cart(pool: PgPool) {
    let user = seed_user(&pool, "buyer").await;
    let dune = seed_book(&pool, "Dune").await;
    let hobbit = seed_book(&pool, "The Hobbit").await;

    let carts = CartRepository::new(&pool);
    carts.add_item(user, dune, 2).await.unwrap();
    carts.add_item(user, hobbit, 1).await.unwrap();

    let orders = OrderRepository::new(&pool);
    let placed = orders.place_from_cart(user).await.unwrap();
    assert_eq!(placed.len(), 3);

    assert!(carts.list(user).await.unwrap().is_empty());

    let history = orders.list_for_user(user).await.unwrap();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|o| o.status == OrderStatus::Placed));
}

#[sqlx::test(migrations = "../api/migrations")]
async fn checkout_with_empty_cart_writes_nothing(pool: PgPool) {
    let user = seed_user(&pool, "buyer").await;
    let orders = OrderRepository::new(&pool);

    assert!(orders.place_from_cart(user).await.unwrap().is_empty());
    assert!(orders.list_for_user(user).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../api/migrations")]
async fn stale_status_update_conflicts(pool: PgPool) {
    let user = seed_user(&pool, "buyer").await;
    let book = seed_book(&pool, "Dune").await;

    let carts = CartRepository::new(&pool);
    carts.add_item(user, book, 1).await.unwrap();

    let orders = OrderRepository::new(&pool);
    let placed = orders.place_from_cart(user).await.unwrap();
    let order = *placed.first().unwrap();

    orders
        .update_status(order, OrderStatus::Placed, OrderStatus::OutForDelivery)
        .await
        .unwrap();

    // A writer that still believes the order is Placed loses.
    let result = orders
        .update_status(order, OrderStatus::Placed, OrderStatus::Canceled)
        .await;
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));

    assert_eq!(
        orders.get_status(order).await.unwrap(),
        Some(OrderStatus::OutForDelivery)
    );
}

#[sqlx::test(migrations = "../api/migrations")]
async fn ordered_book_cannot_be_deleted(pool: PgPool) {
    let user = seed_user(&pool, "buyer").await;
    let book = seed_book(&pool, "Dune").await;

    CartRepository::new(&pool)
        .add_item(user, book, 1)
        .await
        .unwrap();
    OrderRepository::new(&pool)
        .place_from_cart(user)
        .await
        .unwrap();

    let result = BookRepository::new(&pool).delete(book).await;
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}
