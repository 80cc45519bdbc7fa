//! Persisted collection names.

use std::fmt;

/// One of the three persisted collections.
///
/// Each is a single JSON array stored under its key, order-significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Customers, in insertion order.
    Customers,
    /// Installment plans, newest first.
    Plans,
    /// Treasury transactions, newest first.
    Transactions,
}

impl Collection {
    /// All collections.
    pub const ALL: [Self; 3] = [Self::Customers, Self::Plans, Self::Transactions];

    /// Storage key of the collection.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Customers => "app_customers",
            Self::Plans => "app_plans",
            Self::Transactions => "app_transactions",
        }
    }

    /// Object path of the collection document.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}.json", self.key())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
