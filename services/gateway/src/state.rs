use crate::auth::TokenKeys;
use crate::config::GatewayConfig;
use anyhow::Context;
use order_service::{Authenticator, IdentityProvider, MemoryStore, OrderEngine, Store};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<OrderEngine<MemoryStore>>,
    pub authenticator: Arc<Authenticator<MemoryStore>>,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(
        engine: OrderEngine<MemoryStore>,
        authenticator: Authenticator<MemoryStore>,
        tokens: TokenKeys,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            authenticator: Arc::new(authenticator),
            tokens: Arc::new(tokens),
        }
    }

    /// Build the store, seed its stock catalog and wire the services
    pub fn from_config(
        config: &GatewayConfig,
        provider: Arc<dyn IdentityProvider>,
    ) -> anyhow::Result<Self> {
        let store = Arc::new(MemoryStore::new());
        for stock in &config.stocks {
            store
                .create_stock(stock.clone())
                .with_context(|| format!("Failed to load stock {}", stock.id))?;
        }
        tracing::info!(stocks = config.stocks.len(), "Stock catalog loaded");

        let authenticator =
            Authenticator::new(Arc::clone(&store), provider, config.engine.starting_cash);
        let engine = OrderEngine::with_config(store, config.engine.clone());
        let tokens = TokenKeys::new(&config.jwt_secret, config.token_ttl_secs);

        Ok(Self::new(engine, authenticator, tokens))
    }
}
