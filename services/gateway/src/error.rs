use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use order_service::identity::AuthError;
use order_service::EngineError;
use serde_json::json;
use thiserror::Error;
use types::errors::OrderError;

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Order(e) => match e {
                OrderError::NotFound { .. } | OrderError::UnknownUser { .. } => {
                    AppError::NotFound(e.to_string())
                }
                OrderError::NotOwner { .. } | OrderError::OwnerMismatch { .. } => {
                    AppError::Forbidden(e.to_string())
                }
                OrderError::InsufficientCapacity { .. }
                | OrderError::InvalidQuantity(_)
                | OrderError::InvalidPrice(_)
                | OrderError::UnknownStock { .. } => AppError::BadRequest(e.to_string()),
            },
            EngineError::Auth(AuthError::Rejected { message, .. }) => AppError::Unauthorized(message),
            EngineError::Auth(e) => AppError::ServiceUnavailable(e.to_string()),
            EngineError::Persistence(e) => AppError::InternalError(anyhow::Error::new(e)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, "FORBIDDEN"),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                msg,
                "SERVICE_UNAVAILABLE",
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::InternalError(e) => {
                tracing::error!(error = %e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_service::StoreError;
    use types::ids::{OrderId, UserId};
    use types::order::Side;

    fn status_of(err: EngineError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_engine_error_status() {
        let capacity = OrderError::InsufficientCapacity {
            side: Side::Bid,
            required: "2200".to_string(),
            available: "0".to_string(),
        };
        assert_eq!(status_of(capacity.into()), StatusCode::BAD_REQUEST);

        let missing = OrderError::NotFound {
            side: Side::Ask,
            order_id: OrderId::new(250),
        };
        assert_eq!(status_of(missing.into()), StatusCode::NOT_FOUND);

        let foreign = OrderError::NotOwner {
            order_id: OrderId::new(150),
            user_id: UserId::new(3),
        };
        assert_eq!(status_of(foreign.into()), StatusCode::FORBIDDEN);

        let store = StoreError::Unavailable("disk".to_string());
        assert_eq!(status_of(store.into()), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_error_status() {
        let rejected = AuthError::Rejected {
            status_code: 401,
            message: "Invalid Credentials".to_string(),
        };
        assert_eq!(status_of(rejected.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AuthError::Transport("timeout".to_string()).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
