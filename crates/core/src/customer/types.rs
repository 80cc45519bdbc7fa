//! Customer domain types.

use std::fmt;

use aqsat_shared::types::CustomerId;
use serde::{Deserialize, Serialize};

/// Trust tier assigned to a customer.
///
/// Only [`CustomerStatus::Blocked`] has an effect anywhere, and even that is
/// advisory: callers must ask for confirmation before starting a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// Consistently reliable (VIP).
    Trustworthy,
    /// Pays on time.
    Good,
    /// No particular history. Default tier.
    #[default]
    Average,
    /// Late or evasive payer.
    Bad,
    /// Blacklisted.
    Blocked,
}

impl CustomerStatus {
    /// Returns the string representation of the tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trustworthy => "trustworthy",
            Self::Good => "good",
            Self::Average => "average",
            Self::Bad => "bad",
            Self::Blocked => "blocked",
        }
    }

    /// Parses a tier from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trustworthy" => Some(Self::Trustworthy),
            "good" => Some(Self::Good),
            "average" => Some(Self::Average),
            "bad" => Some(Self::Bad),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer buying on installments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier.
    pub id: CustomerId,
    /// Full name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// National identity number.
    #[serde(default)]
    pub national_id: String,
    /// Classification tier. Unset means average.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
    /// Free-text notes about the customer's behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl Customer {
    /// Returns the effective tier, defaulting to average when unset.
    #[must_use]
    pub fn tier(&self) -> CustomerStatus {
        self.status.unwrap_or_default()
    }
}

/// Contact details for a customer entered together with their first plan.
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    /// Full name (required).
    pub name: String,
    /// Contact phone number (required).
    pub phone: String,
    /// National identity number.
    pub national_id: String,
}
