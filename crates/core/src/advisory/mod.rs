//! Advisory notes for installment plans.
//!
//! A best-effort external text generator. Its output is an opaque string
//! stored on the plan and has no effect on any figure.

pub mod client;
pub mod error;
pub mod pending;
pub mod prompt;

pub use client::{AdvisoryGenerator, GeminiAdvisor};
pub use error::AdvisoryError;
pub use pending::PendingAdvisory;
pub use prompt::PlanSummary;
