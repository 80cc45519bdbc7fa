//! Plan pricing and scheduling.
//!
//! Pure functions with no state:
//! - `preview` derives cost basis, customer price, profit and the monthly
//!   installment from the plan-entry inputs
//! - `schedule` does the calendar-month arithmetic for due dates

pub mod preview;
pub mod schedule;

pub use preview::{PlanCalculator, PlanInputs, PlanPreview};
pub use schedule::{add_months, installment_due_date};
