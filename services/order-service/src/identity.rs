//! Login against the external identity provider
//!
//! The provider owns credentials; the exchange only learns the user's id and
//! display name. The first successful login creates the user record funded
//! with the starting cash. No user lock is held while the provider is
//! contacted.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use types::ids::UserId;
use types::user::User;

use crate::config::IdentityConfig;
use crate::error::EngineResult;
use crate::store::{Store, StoreError};

/// Identity provider failures. Any of them means the login is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Credentials rejected (status {status_code}): {message}")]
    Rejected { status_code: i64, message: String },

    #[error("Identity provider unreachable: {0}")]
    Transport(String),

    #[error("Malformed identity provider response: {0}")]
    MalformedResponse(String),
}

/// Who the provider says the caller is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub full_name: String,
}

/// External credential check
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError>;
}

/// Provider response envelope: `{status_code, message}`
///
/// `message` is an object on success and a plain string on failure.
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    status_code: i64,
    message: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ProviderIdentity {
    user_id: String,
    user_fullname: String,
}

/// Decode a provider body into an identity
pub fn parse_provider_response(body: &str) -> Result<Identity, AuthError> {
    let response: ProviderResponse =
        serde_json::from_str(body).map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

    if response.status_code != 200 {
        let message = match response.message {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        return Err(AuthError::Rejected {
            status_code: response.status_code,
            message,
        });
    }

    let identity: ProviderIdentity = serde_json::from_value(response.message)
        .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
    let user_id = identity.user_id.parse().map_err(|_| {
        AuthError::MalformedResponse(format!("user_id is not numeric: {}", identity.user_id))
    })?;

    Ok(Identity {
        user_id,
        full_name: identity.user_fullname,
    })
}

/// Provider reached over HTTP with form-encoded credentials
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    config: IdentityConfig,
}

impl HttpIdentityProvider {
    pub fn new(config: IdentityConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let form = [
            ("user_email", email),
            ("user_pass", password),
            ("event_id", self.config.event_id.as_str()),
            ("event_secret", self.config.event_secret.as_str()),
        ];

        let res = self
            .client
            .post(&self.config.url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status_code: i64::from(status.as_u16()),
                message: body,
            });
        }

        parse_provider_response(&body)
    }
}

/// Resolves logins to user records
pub struct Authenticator<S> {
    store: Arc<S>,
    provider: Arc<dyn IdentityProvider>,
    starting_cash: Decimal,
}

impl<S: Store> Authenticator<S> {
    pub fn new(store: Arc<S>, provider: Arc<dyn IdentityProvider>, starting_cash: Decimal) -> Self {
        Self {
            store,
            provider,
            starting_cash,
        }
    }

    /// Authenticate and return the matching user, creating it on first login
    ///
    /// Nothing is written when the provider refuses the credentials.
    pub async fn login(&self, email: &str, password: &str) -> EngineResult<User> {
        let identity = match self.provider.authenticate(email, password).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(email = %email, error = %e, "Login failed");
                return Err(e.into());
            }
        };

        if let Some(user) = self.store.user(identity.user_id)? {
            info!(user_id = %user.id, "User logged in");
            return Ok(user);
        }

        let user = User::new(identity.user_id, email, identity.full_name, self.starting_cash);
        match self.store.create_user(user) {
            Ok(user) => {
                info!(user_id = %user.id, cash = %user.cash, "User registered");
                Ok(user)
            }
            // Lost a race with a concurrent first login for the same id
            Err(StoreError::Duplicate { .. }) => Ok(self
                .store
                .user(identity.user_id)?
                .ok_or_else(|| StoreError::Missing {
                    table: "users",
                    id: identity.user_id.to_string(),
                })?),
            Err(e) => Err(e.into()),
        }
    }
}
