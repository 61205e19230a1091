//! Service configuration

use rust_decimal::Decimal;
use serde::Deserialize;

/// Cash credited to every newly registered user
pub const STARTING_CASH: u64 = 100_000;

/// Shares a user may sell beyond their ledger position
pub const DEFAULT_SHORT_SELL_ALLOWANCE: u64 = 20;

/// Order engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Extra shares an ask may commit on top of the ledger position
    pub short_sell_allowance: u64,
    /// Cash and lifetime total of a freshly created user
    pub starting_cash: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            short_sell_allowance: DEFAULT_SHORT_SELL_ALLOWANCE,
            starting_cash: Decimal::from(STARTING_CASH),
        }
    }
}

/// Identity provider endpoint and event credentials
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub url: String,
    pub event_id: String,
    pub event_secret: String,
    pub timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            url: "https://api.pragyan.org/event/login".to_string(),
            event_id: String::new(),
            event_secret: String::new(),
            timeout_secs: 10,
        }
    }
}
