use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::debt::Frequency;

use super::{ceil_months, non_negative, positive};

/// Days ahead (inclusive) that count as "upcoming".
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PayoffOutcome {
    PaidOff { months: u32 },
    /// The payment does not exceed the monthly interest.
    NeverPaidOff,
}

/// Months to amortize `principal` at `annual_rate_pct` with a fixed monthly `payment`.
///
/// With monthly rate `r`: `n = ceil(-ln(1 - r·P/A) / ln(1 + r))` when `A > P·r`,
/// `NeverPaidOff` when `A <= P·r`, and `ceil(P/A)` when `r == 0`.
/// `None` for invalid inputs or a month count too large to represent.
pub fn payoff_months(principal: f64, annual_rate_pct: f64, payment: f64) -> Option<PayoffOutcome> {
    if !positive(principal) || !positive(payment) || !non_negative(annual_rate_pct) {
        return None;
    }

    let r = annual_rate_pct / 100.0 / 12.0;
    if r == 0.0 {
        let months = ceil_months(principal / payment)?;
        return Some(PayoffOutcome::PaidOff { months });
    }

    if payment <= principal * r {
        return Some(PayoffOutcome::NeverPaidOff);
    }

    let n = -(1.0 - r * principal / payment).ln() / (1.0 + r).ln();
    if !n.is_finite() || n <= 0.0 {
        return Some(PayoffOutcome::NeverPaidOff);
    }
    let months = ceil_months(n)?;
    Some(PayoffOutcome::PaidOff { months })
}

/// Monthly cost of a recurring amount. One-time items contribute nothing.
pub fn monthly_equivalent(amount: f64, frequency: Frequency) -> f64 {
    match frequency {
        Frequency::Weekly => amount * 4.0,
        Frequency::Monthly => amount,
        Frequency::Yearly => amount / 12.0,
        Frequency::OneTime => 0.0,
    }
}

pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Due today or within the next `UPCOMING_WINDOW_DAYS`.
pub fn is_upcoming(due: NaiveDate, today: NaiveDate) -> bool {
    (0..=UPCOMING_WINDOW_DAYS).contains(&days_until_due(due, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff_reference_example() {
        // ₹1,00,000 at 12% p.a. paying ₹5,000/month
        assert_eq!(
            payoff_months(100_000.0, 12.0, 5_000.0),
            Some(PayoffOutcome::PaidOff { months: 23 })
        );
    }

    #[test]
    fn test_payoff_interest_only_payment_never_finishes() {
        // r·P = 1000 exactly
        assert_eq!(
            payoff_months(100_000.0, 12.0, 1_000.0),
            Some(PayoffOutcome::NeverPaidOff)
        );
        assert_eq!(
            payoff_months(100_000.0, 12.0, 999.0),
            Some(PayoffOutcome::NeverPaidOff)
        );
    }

    #[test]
    fn test_payoff_zero_rate() {
        assert_eq!(
            payoff_months(10_000.0, 0.0, 3_000.0),
            Some(PayoffOutcome::PaidOff { months: 4 })
        );
    }

    #[test]
    fn test_payoff_invalid_input() {
        assert_eq!(payoff_months(0.0, 12.0, 5000.0), None);
        assert_eq!(payoff_months(1000.0, 12.0, 0.0), None);
        assert_eq!(payoff_months(1000.0, -1.0, 100.0), None);
        assert_eq!(payoff_months(f64::INFINITY, 12.0, 100.0), None);
    }

    #[test]
    fn test_payoff_too_long_to_count_is_none() {
        // 1e14 months at zero interest
        assert_eq!(payoff_months(1e12, 0.0, 0.01), None);
        // payment a hair above the monthly interest: roughly 8.5e9 months
        assert_eq!(payoff_months(1e6, 0.000_001, 0.000_834), None);
    }

    #[test]
    fn test_payoff_matches_formula() {
        let (p, annual, a) = (250_000.0_f64, 9.0_f64, 7_500.0_f64);
        let r = annual / 1200.0;
        let expected = (-(1.0 - r * p / a).ln() / (1.0 + r).ln()).ceil() as u32;
        assert_eq!(
            payoff_months(p, annual, a),
            Some(PayoffOutcome::PaidOff { months: expected })
        );
    }

    #[test]
    fn test_monthly_equivalent() {
        assert_eq!(monthly_equivalent(199.0, Frequency::Monthly), 199.0);
        assert_eq!(monthly_equivalent(1200.0, Frequency::Yearly), 100.0);
        assert_eq!(monthly_equivalent(50.0, Frequency::Weekly), 200.0);
        assert_eq!(monthly_equivalent(5000.0, Frequency::OneTime), 0.0);
    }

    #[test]
    fn test_upcoming_window() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2026, 5, d).unwrap();
        assert!(is_upcoming(day(10), today));
        assert!(is_upcoming(day(17), today));
        assert!(!is_upcoming(day(18), today));
        assert!(!is_upcoming(day(9), today));
    }
}
