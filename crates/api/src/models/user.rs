//! User domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bookshelf_core::{Role, UserId, Username};

/// A user account (domain type).
///
/// The password hash deliberately lives outside this type; it is fetched
/// separately by the auth service and never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login username (unique).
    pub username: Username,
    /// Authorization role.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
