//! What-if projections over a user's current profile figures.

use serde::{Deserialize, Serialize};

use super::{ceil_months, non_negative, positive};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileFigures {
    pub savings: f64,
    pub debt: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WhatIfInputs {
    /// Extra saved each month.
    pub savings_amount: f64,
    /// Extra paid toward debt each month.
    pub debt_payment: f64,
    pub timeframe_months: u32,
    pub goal_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsScenario {
    pub current: f64,
    pub projected: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebtScenario {
    pub current: f64,
    pub projected: f64,
    pub reduction: f64,
    /// Months to clear the whole debt at `debt_payment`, interest ignored.
    pub months_to_clear: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    Achievable,
    Challenging,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalScenario {
    pub goal_amount: f64,
    pub months_needed: Option<u32>,
    pub monthly_required: f64,
    pub feasibility: Feasibility,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombinedScenario {
    pub total_savings: f64,
    pub total_debt_reduction: f64,
    pub net_worth_improvement: f64,
    pub monthly_commitment: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenarios {
    pub savings: SavingsScenario,
    pub debt: DebtScenario,
    pub goal: GoalScenario,
    pub combined: CombinedScenario,
}

pub fn project_scenarios(figures: &ProfileFigures, inputs: &WhatIfInputs) -> Option<Scenarios> {
    if !non_negative(inputs.savings_amount)
        || !non_negative(inputs.debt_payment)
        || !positive(inputs.goal_amount)
        || inputs.timeframe_months == 0
    {
        return None;
    }

    let months = inputs.timeframe_months as f64;
    let saved = inputs.savings_amount * months;
    let paid = (inputs.debt_payment * months).min(figures.debt.max(0.0));
    let surplus = figures.monthly_income - figures.monthly_expenses;
    let monthly_required = (inputs.goal_amount / months).ceil();

    Some(Scenarios {
        savings: SavingsScenario {
            current: figures.savings,
            projected: figures.savings + saved,
            difference: saved,
        },
        debt: DebtScenario {
            current: figures.debt,
            projected: (figures.debt - inputs.debt_payment * months).max(0.0),
            reduction: paid,
            months_to_clear: if positive(inputs.debt_payment) {
                ceil_months(figures.debt.max(0.0) / inputs.debt_payment)
            } else {
                None
            },
        },
        goal: GoalScenario {
            goal_amount: inputs.goal_amount,
            months_needed: if positive(inputs.savings_amount) {
                ceil_months(inputs.goal_amount / inputs.savings_amount)
            } else {
                None
            },
            monthly_required,
            feasibility: if inputs.goal_amount / months <= surplus {
                Feasibility::Achievable
            } else {
                Feasibility::Challenging
            },
        },
        combined: CombinedScenario {
            total_savings: figures.savings + saved,
            total_debt_reduction: paid,
            net_worth_improvement: saved + paid,
            monthly_commitment: inputs.savings_amount + inputs.debt_payment,
        },
    })
}
