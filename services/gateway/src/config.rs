//! Gateway configuration
//!
//! Read from the TOML file named by `GATEWAY_CONFIG`; every field has a
//! default so a missing file or a partial one still starts the service.

use anyhow::Context;
use order_service::{EngineConfig, IdentityConfig};
use serde::Deserialize;
use std::net::SocketAddr;
use types::stock::Stock;

pub const CONFIG_ENV: &str = "GATEWAY_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    /// Seconds between sweeps of idle user locks; 0 disables the sweep
    pub lock_prune_secs: u64,
    pub engine: EngineConfig,
    pub identity: IdentityConfig,
    /// Stock catalog loaded into the store at startup
    pub stocks: Vec<Stock>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            jwt_secret: "secret".to_string(),
            token_ttl_secs: 24 * 60 * 60,
            lock_prune_secs: 300,
            engine: EngineConfig::default(),
            identity: IdentityConfig::default(),
            stocks: Vec::new(),
        }
    }
}

impl GatewayConfig {
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("Invalid gateway config")
    }

    /// Load from `$GATEWAY_CONFIG`, or defaults when it is unset
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file {}", path))?;
                Self::from_toml(&raw)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use types::ids::StockId;

    #[test]
    fn test_nested_sections() {
        let config = GatewayConfig::from_toml(
            r#"
            bind_addr = "127.0.0.1:9000"
            jwt_secret = "s3cret"

            [engine]
            short_sell_allowance = 0

            [identity]
            url = "http://localhost:8081/login"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.token_ttl_secs, 86_400);
        assert_eq!(config.lock_prune_secs, 300);
        assert_eq!(config.engine.short_sell_allowance, 0);
        assert_eq!(config.identity.url, "http://localhost:8081/login");
    }

    #[test]
    fn test_sample_config_lists_stocks() {
        let config = GatewayConfig::from_toml(include_str!("../gateway.toml")).unwrap();
        assert_eq!(config.stocks.len(), 3);
        assert_eq!(config.stocks[0].id, StockId::new(1));
        assert_eq!(config.stocks[0].short_name, "ACME");
        assert!(config.stocks[0].current_price.is_none());
        assert_eq!(config.engine.starting_cash, Decimal::from(100_000));
    }

    #[test]
    fn test_bad_toml() {
        assert!(GatewayConfig::from_toml("bind_addr = 12").is_err());
    }
}
