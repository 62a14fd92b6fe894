//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

/// Load `.env` and read the database URL the commands connect with.
pub(crate) fn database_url() -> Result<String, MissingEnvVar> {
    dotenvy::dotenv().ok();

    std::env::var("BOOKSHELF_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MissingEnvVar("BOOKSHELF_DATABASE_URL"))
}

/// Required environment variable is missing.
#[derive(Debug, thiserror::Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVar(pub &'static str);
