//! Customer registry and classification.

pub mod error;
pub mod registry;
pub mod types;

pub use error::CustomerError;
pub use registry::CustomerRegistry;
pub use types::{Customer, CustomerStatus, NewCustomer};
