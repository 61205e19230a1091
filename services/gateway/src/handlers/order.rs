//! Order placement and cancellation
//!
//! Both take the caller's user lock inside the engine. That lock is a
//! blocking mutex, so the engine call runs on the blocking pool and a burst
//! from one user queues there instead of stalling the async workers.

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{OrderResponse, PlaceOrderRequest};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use order_service::EngineResult;
use types::ids::OrderId;
use types::order::{Order, Side};

/// Run a lock-taking engine call off the async workers
async fn run_locked<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> EngineResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::InternalError(e.into()))?;
    Ok(result?)
}

async fn place(
    state: AppState,
    user: AuthenticatedUser,
    side: Side,
    payload: PlaceOrderRequest,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let user_id = user.user_id;
    let request = payload.into_request(user_id);
    let engine = state.engine;
    let order_id = run_locked(move || engine.place(user_id, side, request)).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse { order_id, side })))
}

async fn cancel(
    state: AppState,
    user: AuthenticatedUser,
    side: Side,
    order_id: u64,
) -> Result<StatusCode, AppError> {
    let user_id = user.user_id;
    let engine = state.engine;
    run_locked(move || engine.cancel(user_id, OrderId::new(order_id), side)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn place_ask(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    place(state, user, Side::Ask, payload).await
}

pub async fn place_bid(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    place(state, user, Side::Bid, payload).await
}

pub async fn cancel_ask(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    cancel(state, user, Side::Ask, order_id).await
}

pub async fn cancel_bid(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    cancel(state, user, Side::Bid, order_id).await
}

pub async fn open_asks(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.engine.open_orders(user.user_id, Side::Ask)?))
}

pub async fn open_bids(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.engine.open_orders(user.user_id, Side::Bid)?))
}
