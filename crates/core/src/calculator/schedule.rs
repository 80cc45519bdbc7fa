//! Calendar-month arithmetic for plan due dates.
//!
//! Rule: the day of month is preserved when the target month has it,
//! otherwise it clamps to the last day of the target month
//! (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year).

use chrono::{Months, NaiveDate};

/// Shift `start` by `months` calendar months (negative shifts go backwards).
///
/// Returns `None` only when the result falls outside chrono's date range.
#[must_use]
pub fn add_months(start: NaiveDate, months: i32) -> Option<NaiveDate> {
    let shift = Months::new(months.unsigned_abs());
    if months >= 0 {
        start.checked_add_months(shift)
    } else {
        start.checked_sub_months(shift)
    }
}

/// Notional due date of the installment at 1-based position `ordinal`.
#[must_use]
pub fn installment_due_date(start: NaiveDate, ordinal: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(ordinal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2025, 1, 15), 10, date(2025, 11, 15))]
    #[case(date(2025, 3, 10), 12, date(2026, 3, 10))]
    #[case(date(2025, 1, 31), 1, date(2025, 2, 28))]
    #[case(date(2024, 1, 31), 1, date(2024, 2, 29))]
    #[case(date(2025, 8, 31), 1, date(2025, 9, 30))]
    #[case(date(2025, 5, 20), 0, date(2025, 5, 20))]
    #[case(date(2025, 5, 31), -3, date(2025, 2, 28))]
    fn test_add_months(#[case] start: NaiveDate, #[case] months: i32, #[case] expected: NaiveDate) {
        assert_eq!(add_months(start, months), Some(expected));
    }

    #[test]
    fn test_add_months_out_of_range() {
        assert_eq!(add_months(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn test_installment_due_dates_follow_start() {
        let start = date(2025, 1, 31);
        assert_eq!(installment_due_date(start, 1), Some(date(2025, 2, 28)));
        assert_eq!(installment_due_date(start, 2), Some(date(2025, 3, 31)));
        assert_eq!(installment_due_date(start, 3), Some(date(2025, 4, 30)));
    }
}
