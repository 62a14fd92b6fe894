//! Registration, login and profile handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bookshelf_core::{Role, UserId};

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Credentials for sign-up and sign-in.
#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub username: String,
    pub password: String,
}

/// Response for a successful sign-up or sign-in.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: UserId,
    pub role: Role,
    pub token: String,
}

/// Register a new account.
///
/// New accounts always get the `user` role.
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.pool(), state.signer());
    let authenticated = service.register(&payload.username, &payload.password).await?;

    tracing::info!(user_id = %authenticated.user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            id: authenticated.user.id,
            role: authenticated.user.role,
            token: authenticated.token,
        }),
    ))
}

/// Login with username and password.
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<SessionResponse>> {
    let service = AuthService::new(state.pool(), state.signer());
    let authenticated = service.login(&payload.username, &payload.password).await?;

    Ok(Json(SessionResponse {
        id: authenticated.user.id,
        role: authenticated.user.role,
        token: authenticated.token,
    }))
}

/// Current user profile.
///
/// Looked up fresh from the database so a renamed or promoted account is
/// reflected immediately, not at next token issue.
#[instrument(skip(state))]
pub async fn me(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<User>> {
    let user = crate::db::UserRepository::new(state.pool())
        .get_by_id(auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_string()))?;

    Ok(Json(user))
}
