//! Integration tests for Bookshelf.
//!
//! The tests under `tests/` exercise the repository layer against a real
//! `PostgreSQL` database: the invariants the schema enforces (pair primary
//! keys, foreign keys, the price check) cannot be observed without one.
//!
//! # Running Tests
//!
//! `#[sqlx::test]` provisions an isolated database per test and applies
//! the api crate's migrations, so tests never see each other's rows.
//!
//! ```bash
//! # Point at a Postgres with createdb rights
//! export DATABASE_URL=postgres://postgres@localhost/postgres
//!
//! cargo test -p bookshelf-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
