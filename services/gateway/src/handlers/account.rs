use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{LoginRequest, LoginResponse, StocksOwnedResponse};
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest("Email and password are required".into()));
    }

    let user = state
        .authenticator
        .login(&payload.email, &payload.password)
        .await?;
    let token = state.tokens.issue(user.id)?;

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

pub async fn stocks_owned(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<StocksOwnedResponse>, AppError> {
    let owned = state.engine.stocks_owned(user.user_id)?;
    Ok(Json(StocksOwnedResponse {
        stocks_owned: owned.into_iter().collect(),
    }))
}
