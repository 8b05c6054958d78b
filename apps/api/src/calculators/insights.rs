use serde::{Deserialize, Serialize};

use crate::models::profile::FinancialProfileRow;

use super::positive;

/// Months of expenses an emergency fund should cover.
pub const EMERGENCY_FUND_MONTHS: f64 = 6.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CreditBand {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

/// Bands on the 300–900 scale used by Indian bureaus.
pub fn credit_band(score: i32) -> Option<CreditBand> {
    match score {
        s if !(300..=900).contains(&s) => None,
        s if s < 580 => Some(CreditBand::Poor),
        s if s < 670 => Some(CreditBand::Fair),
        s if s < 740 => Some(CreditBand::Good),
        s if s < 800 => Some(CreditBand::VeryGood),
        _ => Some(CreditBand::Excellent),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileInsights {
    /// Percent of income not spent.
    pub savings_rate: Option<f64>,
    pub monthly_surplus: Option<f64>,
    pub emergency_fund_goal: Option<f64>,
    /// Percent of the emergency fund already saved, capped at 100.
    pub emergency_fund_progress: Option<f64>,
    pub emergency_fund_gap: Option<f64>,
    /// Debt as a multiple of monthly income.
    pub debt_to_income: Option<f64>,
    pub credit_band: Option<CreditBand>,
}

pub fn profile_insights(profile: &FinancialProfileRow) -> ProfileInsights {
    let income = profile.monthly_income.filter(|v| positive(*v));
    let expenses = profile.monthly_expenses.filter(|v| v.is_finite() && *v >= 0.0);
    let savings = profile.savings_balance.filter(|v| v.is_finite());

    let monthly_surplus = income.zip(expenses).map(|(i, e)| i - e);
    let savings_rate = income
        .zip(monthly_surplus)
        .map(|(i, surplus)| surplus / i * 100.0);

    let emergency_fund_goal = expenses
        .map(|e| e * EMERGENCY_FUND_MONTHS)
        .filter(|goal| positive(*goal));
    let emergency_fund_progress = emergency_fund_goal
        .zip(savings)
        .map(|(goal, saved)| (saved / goal * 100.0).clamp(0.0, 100.0));
    let emergency_fund_gap = emergency_fund_goal
        .zip(savings)
        .map(|(goal, saved)| (goal - saved).max(0.0));

    let debt_to_income = income
        .zip(profile.debt_amount.filter(|d| d.is_finite()))
        .map(|(i, d)| d / i);

    ProfileInsights {
        savings_rate,
        monthly_surplus,
        emergency_fund_goal,
        emergency_fund_progress,
        emergency_fund_gap,
        debt_to_income,
        credit_band: profile.credit_score.and_then(credit_band),
    }
}
