//! Authentication extractors.
//!
//! Provides extractors for requiring bearer-token authentication in route
//! handlers. A missing, malformed, forged, or expired token rejects the
//! request before the handler body runs, so guarded routes can never touch
//! the database on an unauthenticated request.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use bookshelf_core::{Role, UserId};

use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// The authenticated caller, as established from the bearer token.
///
/// The subject id comes from the verified token claims, never from request
/// headers or bodies, so a caller can only ever act on their own account.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The authenticated user's ID.
    pub id: UserId,
    /// The user's role at token-issue time.
    pub role: Role,
}

/// Extractor that requires bearer-token authentication.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, user {}!", user.id)
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

/// Extractor that additionally requires the `admin` role.
///
/// Non-admin callers get 403; unauthenticated callers get 401, same as
/// [`RequireAuth`].
pub struct RequireAdmin(pub AuthUser);

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header_value = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_owned()))?;

    let as_str = header_value
        .to_str()
        .map_err(|_| AppError::Unauthorized("invalid authorization header".to_owned()))?;

    as_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("expected bearer authorization".to_owned()))
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = state
            .signer()
            .verify(token)
            .map_err(|e| AppError::Auth(AuthError::Token(e)))?;

        Ok(Self(AuthUser {
            id: claims.sub,
            role: claims.role,
        }))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;

        if user.role != Role::Admin {
            return Err(AppError::Forbidden("admin role required".to_owned()));
        }

        Ok(Self(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/favourites");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_missing_header() {
        let parts = parts_with_auth(None);
        assert!(bearer_token(&parts).is_err());
    }

    #[test]
    fn test_wrong_scheme() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert!(bearer_token(&parts).is_err());
    }

    #[test]
    fn test_bearer_extracted() {
        let parts = parts_with_auth(Some("Bearer abc.def"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def");
    }
}
