//! Authentication routes: signup and login.
//!
//! These return a bare `{ token }` body rather than the data envelope;
//! that shape is part of the fixed contract.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::user::{LoginRequest, SignupRequest};
use crate::services::auth as auth_service;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = auth_service::signup(
        &state.db,
        &body,
        &state.config.jwt_secret,
        state.config.jwt_token_expiry_secs,
    )
    .await?;

    Ok(Json(TokenResponse { token }))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = auth_service::login(
        &state.db,
        &body.email,
        &body.password,
        &state.config.jwt_secret,
        state.config.jwt_token_expiry_secs,
    )
    .await?;

    Ok(Json(TokenResponse { token }))
}
