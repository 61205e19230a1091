//! Order service errors
//!
//! Wraps the business-rule, storage and identity failures behind one type
//! so callers can match on the layer that failed.

use thiserror::Error;
use types::errors::OrderError;

use crate::identity::AuthError;
use crate::store::StoreError;

/// Top-level order service error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// The business-rule error, if that is what failed
    pub fn as_order_error(&self) -> Option<&OrderError> {
        match self {
            EngineError::Order(e) => Some(e),
            _ => None,
        }
    }
}
