//! Admin account management commands.
//!
//! There is deliberately no HTTP path to the `admin` role: sign-up always
//! produces a regular account, and promotions happen here.
//!
//! # Usage
//!
//! ```bash
//! bookshelf-cli admin create -u shopkeeper -p 'a long password'
//! ```
//!
//! # Environment Variables
//!
//! - `BOOKSHELF_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection
//!   string

use sqlx::PgPool;
use thiserror::Error;

use bookshelf_core::{Role, Username};

use bookshelf_api::db::{RepositoryError, UserRepository};
use bookshelf_api::services::auth::{AuthError, hash_password};

use super::MissingEnvVar;

/// Errors that can occur during admin account operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVar),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid username.
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] bookshelf_core::UsernameError),

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] AuthError),

    /// Account already exists.
    #[error("Account already exists with username: {0}")]
    UserExists(String),

    /// Repository error.
    #[error("Database error: {0}")]
    Repository(RepositoryError),
}

/// Create a new admin account.
///
/// # Returns
///
/// The ID of the created account.
pub async fn create(username: &str, password: &str) -> Result<i32, AdminError> {
    let username = Username::parse(username)?;
    let password_hash = hash_password(password)?;

    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating admin account: {}", username);

    let user = UserRepository::new(&pool)
        .create(&username, &password_hash, Role::Admin)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AdminError::UserExists(username.to_string()),
            other => AdminError::Repository(other),
        })?;

    tracing::info!("Admin account created with id {}", user.id);
    Ok(user.id.into())
}
