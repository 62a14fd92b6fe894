//! Seed the catalogue with books from a YAML file.
//!
//! The file is a YAML list of books:
//!
//! ```yaml
//! - title: The Name of the Wind
//!   author: Patrick Rothfuss
//!   description: A legend recounts his own story.
//!   language: English
//!   price: "14.99"
//!   image_url: https://covers.example.com/notw.jpg
//! ```

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

use bookshelf_core::Price;

use bookshelf_api::db::RepositoryError;
use bookshelf_api::db::books::{BookFields, BookRepository};

use super::MissingEnvVar;

/// A book as declared in the seed file.
///
/// `Price` deserialization rejects negative amounts, so a bad seed file
/// fails at parse time before anything is written.
#[derive(Debug, Deserialize)]
struct SeedBook {
    title: String,
    author: String,
    description: String,
    language: String,
    price: Price,
    image_url: String,
}

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVar),

    /// Seed file could not be read.
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file could not be parsed.
    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Insert failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Insert every book listed in `file_path` into the catalogue.
pub async fn books(file_path: &str) -> Result<(), SeedError> {
    let database_url = super::database_url()?;

    let contents = std::fs::read_to_string(file_path)?;
    let seed_books: Vec<SeedBook> = serde_yaml::from_str(&contents)?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;
    let repo = BookRepository::new(&pool);

    tracing::info!("Seeding {} books from {}", seed_books.len(), file_path);

    for book in &seed_books {
        let created = repo
            .create(&BookFields {
                title: &book.title,
                author: &book.author,
                description: &book.description,
                language: &book.language,
                price: book.price,
                image_url: &book.image_url,
            })
            .await?;

        tracing::info!(book_id = %created.id, title = %created.title, "Book seeded");
    }

    tracing::info!("Seeding complete!");
    Ok(())
}
