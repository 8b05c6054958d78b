use serde::{Deserialize, Serialize};

use super::{non_negative, positive};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FutureValue {
    pub future_value: f64,
    pub total_contributed: f64,
    pub interest_earned: f64,
}

/// Compound growth with monthly compounding and end-of-month contributions:
/// `FV = P(1+r)^n + C((1+r)^n - 1)/r`, degenerating to `P + C·n` at `r = 0`.
pub fn future_value(
    principal: f64,
    annual_rate_pct: f64,
    monthly_contribution: f64,
    months: u32,
) -> Option<FutureValue> {
    if !non_negative(principal) || !non_negative(monthly_contribution) || !non_negative(annual_rate_pct) {
        return None;
    }

    let n = months as f64;
    let r = annual_rate_pct / 100.0 / 12.0;
    let fv = if r == 0.0 {
        principal + monthly_contribution * n
    } else {
        let growth = (1.0 + r).powf(n);
        principal * growth + monthly_contribution * (growth - 1.0) / r
    };
    if !fv.is_finite() {
        return None;
    }

    let total_contributed = principal + monthly_contribution * n;
    Some(FutureValue {
        future_value: fv,
        total_contributed,
        interest_earned: fv - total_contributed,
    })
}

/// Saved by cutting a monthly cost for `months`.
pub fn subscription_savings(monthly_cut: f64, months: u32) -> Option<f64> {
    if !positive(monthly_cut) || months == 0 {
        return None;
    }
    Some(monthly_cut * months as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_is_simple_sum() {
        let fv = future_value(1000.0, 0.0, 500.0, 12).unwrap();
        assert_eq!(fv.future_value, 7000.0);
        assert_eq!(fv.interest_earned, 0.0);
    }

    #[test]
    fn test_lump_sum_compounds_monthly() {
        // 1,00,000 at 12% for 12 months = 100000 * 1.01^12
        let fv = future_value(100_000.0, 12.0, 0.0, 12).unwrap();
        assert!((fv.future_value - 112_682.50).abs() < 0.01, "{}", fv.future_value);
    }

    #[test]
    fn test_contributions_annuity() {
        // 1000/month at 12% for 12 months = 1000 * (1.01^12 - 1) / 0.01
        let fv = future_value(0.0, 12.0, 1000.0, 12).unwrap();
        assert!((fv.future_value - 12_682.50).abs() < 0.01, "{}", fv.future_value);
        assert_eq!(fv.total_contributed, 12_000.0);
        assert!(fv.interest_earned > 0.0);
    }

    #[test]
    fn test_future_value_rejects_negative() {
        assert!(future_value(-1.0, 5.0, 0.0, 12).is_none());
        assert!(future_value(1.0, -5.0, 0.0, 12).is_none());
    }

    #[test]
    fn test_subscription_savings() {
        assert_eq!(subscription_savings(649.0, 12), Some(7788.0));
        assert_eq!(subscription_savings(649.0, 0), None);
        assert_eq!(subscription_savings(0.0, 12), None);
    }
}
