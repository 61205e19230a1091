//! User accounts
//!
//! A user is created on first successful login and funded with the
//! exchange's starting cash. Cash only moves when a ledger transaction is
//! settled.

use crate::ids::UserId;
use crate::numeric::Cash;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// User account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    /// Cash currently available to the user
    pub cash: Cash,
    /// Lifetime net worth: cash plus mark-to-market value of holdings
    pub total: Cash,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

impl User {
    /// Create a freshly registered user holding `starting_cash`
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        starting_cash: Cash,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            cash: starting_cash,
            total: starting_cash,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Bare record with only an id and a cash balance, used for seeding
    pub fn with_cash(id: UserId, cash: Cash) -> Self {
        Self {
            id,
            email: String::new(),
            name: String::new(),
            cash,
            total: cash,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_new_user_is_funded() {
        let user = User::new(UserId::new(2), "test@testmail.com", "TestName", Decimal::from(100_000));
        assert_eq!(user.cash, Decimal::from(100_000));
        assert_eq!(user.total, user.cash);
        assert!(chrono::DateTime::parse_from_rfc3339(&user.created_at).is_ok());
    }

    #[test]
    fn test_user_serialization() {
        let user = User::with_cash(UserId::new(3), Decimal::from(1000));
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user, back);
    }
}
