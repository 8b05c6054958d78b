//! Monthly budget categories keyed by `YYYY-MM`.

pub mod handlers;
pub mod store;

use chrono::NaiveDate;

/// `YYYY-MM` for the month containing `date`.
pub fn current_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_month_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2026, 4, 9).unwrap();
        assert_eq!(current_month(date), "2026-04");
    }
}
