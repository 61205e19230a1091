//! Fixed-point decimal types for prices and share quantities
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Share quantities are whole numbers; positions are signed because the
//! ledger permits short exposure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Cash amounts (user balances, ledger totals, reserved bid cost)
pub type Cash = Decimal;

/// Net signed share count for one (user, stock) pair
pub type Position = i64;

/// Unit price of a stock. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Create a price, returning None unless the value is positive
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn from_u64(value: u64) -> Self {
        assert!(value > 0, "Price must be positive");
        Self(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Cash needed to buy `quantity` shares at this price
    ///
    /// None when the product does not fit in a `Decimal`.
    pub fn cost_of(&self, quantity: Quantity) -> Option<Cash> {
        self.0.checked_mul(Decimal::from(quantity.get()))
    }
}

impl FromStr for Price {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|e| e.to_string())?;
        Self::try_new(value).ok_or_else(|| format!("price must be positive, got {}", s))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = String;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or_else(|| format!("price must be positive, got {}", value))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whole number of shares on an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const fn new(shares: u64) -> Self {
        Self(shares)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Share count as a signed position delta
    pub fn as_position(&self) -> Position {
        Position::try_from(self.0).unwrap_or(Position::MAX)
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
