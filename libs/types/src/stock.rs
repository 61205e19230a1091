//! Stock catalog entries

use crate::ids::StockId;
use crate::numeric::Price;
use serde::{Deserialize, Serialize};

/// A tradable instrument
///
/// The order core only cares about the id; name and price are carried for
/// catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: StockId,
    pub short_name: String,
    pub full_name: String,
    pub current_price: Option<Price>,
}

impl Stock {
    pub fn new(id: StockId, short_name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id,
            short_name: short_name.into(),
            full_name: full_name.into(),
            current_price: None,
        }
    }

    /// Catalog entry with no display metadata
    pub fn bare(id: StockId) -> Self {
        Self::new(id, "", "")
    }
}
