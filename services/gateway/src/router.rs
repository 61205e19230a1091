use crate::handlers::{account, order};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/login", post(account::login))
        .route("/stocks-owned", get(account::stocks_owned))
        .route("/asks", post(order::place_ask).get(order::open_asks))
        .route("/asks/{id}", delete(order::cancel_ask))
        .route("/bids", post(order::place_bid).get(order::open_bids))
        .route("/bids/{id}", delete(order::cancel_bid));

    Router::new()
        .nest("/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
