use serde::{Deserialize, Serialize};

use super::{non_negative, positive};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    OnTrack,
    Warning,
    OverBudget,
}

/// Share of the allocation spent, capped at 100.
/// `None` unless `allocated > 0` and `spent >= 0`.
pub fn budget_percentage(allocated: f64, spent: f64) -> Option<f64> {
    if !positive(allocated) || !non_negative(spent) {
        return None;
    }
    Some((spent / allocated * 100.0).min(100.0))
}

/// Uses the uncapped ratio: ≤70% on track, ≤90% warning, otherwise over budget.
pub fn budget_health(allocated: f64, spent: f64) -> Option<BudgetHealth> {
    if !positive(allocated) || !non_negative(spent) {
        return None;
    }
    let pct = spent / allocated * 100.0;
    Some(if pct <= 70.0 {
        BudgetHealth::OnTrack
    } else if pct <= 90.0 {
        BudgetHealth::Warning
    } else {
        BudgetHealth::OverBudget
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetTotals {
    pub total_allocated: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub percentage: Option<f64>,
}

/// Totals over `(allocated, spent)` pairs.
pub fn budget_totals(items: impl IntoIterator<Item = (f64, f64)>) -> BudgetTotals {
    let (total_allocated, total_spent) = items
        .into_iter()
        .fold((0.0, 0.0), |(a, s), (alloc, spent)| (a + alloc, s + spent));
    BudgetTotals {
        total_allocated,
        total_spent,
        remaining: total_allocated - total_spent,
        percentage: budget_percentage(total_allocated, total_spent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_basic() {
        assert_eq!(budget_percentage(10000.0, 2500.0), Some(25.0));
    }

    #[test]
    fn test_percentage_capped_at_100() {
        assert_eq!(budget_percentage(1000.0, 1800.0), Some(100.0));
    }

    #[test]
    fn test_percentage_guards_zero_allocation() {
        assert_eq!(budget_percentage(0.0, 100.0), None);
        assert_eq!(budget_percentage(f64::NAN, 100.0), None);
        assert_eq!(budget_percentage(1000.0, -5.0), None);
    }

    #[test]
    fn test_percentage_monotonic_in_spent() {
        let allocated = 7300.0;
        let mut last = 0.0;
        for step in 0..=200 {
            let spent = step as f64 * 50.0;
            let pct = budget_percentage(allocated, spent).unwrap();
            assert!(pct >= last, "pct {pct} dropped below {last} at spent {spent}");
            assert!(pct <= 100.0);
            last = pct;
        }
    }

    #[test]
    fn test_health_thresholds() {
        assert_eq!(budget_health(100.0, 70.0), Some(BudgetHealth::OnTrack));
        assert_eq!(budget_health(100.0, 90.0), Some(BudgetHealth::Warning));
        assert_eq!(budget_health(100.0, 90.5), Some(BudgetHealth::OverBudget));
        assert_eq!(budget_health(0.0, 1.0), None);
    }

    #[test]
    fn test_totals() {
        let totals = budget_totals(vec![(5000.0, 1000.0), (3000.0, 3000.0)]);
        assert_eq!(totals.total_allocated, 8000.0);
        assert_eq!(totals.total_spent, 4000.0);
        assert_eq!(totals.remaining, 4000.0);
        assert_eq!(totals.percentage, Some(50.0));
    }

    #[test]
    fn test_totals_empty() {
        let totals = budget_totals(Vec::new());
        assert_eq!(totals.total_allocated, 0.0);
        assert_eq!(totals.percentage, None);
    }
}
