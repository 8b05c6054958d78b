//! Axum route handlers for the what-if simulators and profile insights.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculators::debt::{payoff_months, PayoffOutcome};
use crate::calculators::goals::months_to_goal;
use crate::calculators::growth::{future_value, subscription_savings, FutureValue};
use crate::calculators::insights::{profile_insights, ProfileInsights};
use crate::calculators::scenarios::{project_scenarios, ProfileFigures, Scenarios, WhatIfInputs};
use crate::errors::AppError;
use crate::models::profile::FinancialProfileRow;
use crate::profile::store::get_profile;
use crate::routes::UserIdQuery;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DebtPayoffRequest {
    pub principal: f64,
    pub annual_rate_pct: f64,
    pub monthly_payment: f64,
}

#[derive(Debug, Serialize)]
pub struct DebtPayoffResponse {
    #[serde(flatten)]
    pub outcome: PayoffOutcome,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct GoalSimRequest {
    pub goal_amount: f64,
    pub monthly_saving: f64,
}

#[derive(Debug, Serialize)]
pub struct GoalSimResponse {
    pub months: u32,
}

#[derive(Debug, Deserialize)]
pub struct CompoundRequest {
    pub principal: f64,
    pub annual_rate_pct: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    pub months: u32,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionRequest {
    pub monthly_cut: f64,
    pub months: u32,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub savings: f64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub inputs: WhatIfInputs,
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

pub fn payoff_message(outcome: &PayoffOutcome) -> String {
    match outcome {
        PayoffOutcome::PaidOff { months } => {
            format!("You will pay off your debt in {months} month{}.", plural(*months))
        }
        PayoffOutcome::NeverPaidOff => {
            "Monthly payment is too low to ever pay off this debt.".to_string()
        }
    }
}

pub fn figures_from_profile(profile: &FinancialProfileRow) -> ProfileFigures {
    ProfileFigures {
        savings: profile.savings_balance.unwrap_or(0.0),
        debt: profile.debt_amount.unwrap_or(0.0),
        monthly_income: profile.monthly_income.unwrap_or(0.0),
        monthly_expenses: profile.monthly_expenses.unwrap_or(0.0),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/simulate/debt-payoff
pub async fn handle_debt_payoff(
    Json(req): Json<DebtPayoffRequest>,
) -> Result<Json<DebtPayoffResponse>, AppError> {
    let outcome = payoff_months(req.principal, req.annual_rate_pct, req.monthly_payment)
        .ok_or_else(|| {
            AppError::Validation(
                "principal and monthly_payment must be positive, annual_rate_pct non-negative, \
                 and the payoff period small enough to count in months"
                    .to_string(),
            )
        })?;
    Ok(Json(DebtPayoffResponse {
        message: payoff_message(&outcome),
        outcome,
    }))
}

/// POST /api/v1/simulate/goal
pub async fn handle_goal_simulation(
    Json(req): Json<GoalSimRequest>,
) -> Result<Json<GoalSimResponse>, AppError> {
    let months = months_to_goal(req.goal_amount, req.monthly_saving).ok_or_else(|| {
        AppError::Validation(
            "goal_amount and monthly_saving must be positive and reach the goal in a countable number of months"
                .to_string(),
        )
    })?;
    Ok(Json(GoalSimResponse { months }))
}

/// POST /api/v1/simulate/compound
pub async fn handle_compound(
    Json(req): Json<CompoundRequest>,
) -> Result<Json<FutureValue>, AppError> {
    future_value(
        req.principal,
        req.annual_rate_pct,
        req.monthly_contribution,
        req.months,
    )
    .map(Json)
    .ok_or_else(|| AppError::Validation("inputs must be non-negative numbers".to_string()))
}

/// POST /api/v1/simulate/subscription
pub async fn handle_subscription(
    Json(req): Json<SubscriptionRequest>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let savings = subscription_savings(req.monthly_cut, req.months).ok_or_else(|| {
        AppError::Validation("monthly_cut and months must be positive".to_string())
    })?;
    Ok(Json(SubscriptionResponse {
        savings,
        message: format!(
            "You will save {} in {} month{} by cancelling this subscription.",
            crate::advice::grounding::format_rupees(savings),
            req.months,
            plural(req.months)
        ),
    }))
}

/// POST /api/v1/simulate/scenarios
///
/// Projects savings, debt, goal and combined what-ifs from the stored profile.
pub async fn handle_scenarios(
    State(state): State<AppState>,
    Json(req): Json<ScenarioRequest>,
) -> Result<Json<Scenarios>, AppError> {
    let profile = get_profile(&state.db, req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Financial profile not found".to_string()))?;

    project_scenarios(&figures_from_profile(&profile), &req.inputs)
        .map(Json)
        .ok_or_else(|| {
            AppError::Validation(
                "goal_amount and timeframe_months must be positive; amounts non-negative"
                    .to_string(),
            )
        })
}

/// GET /api/v1/insights
pub async fn handle_insights(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileInsights>, AppError> {
    let profile = get_profile(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Financial profile not found".to_string()))?;
    Ok(Json(profile_insights(&profile)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff_message_pluralizes() {
        assert_eq!(
            payoff_message(&PayoffOutcome::PaidOff { months: 1 }),
            "You will pay off your debt in 1 month."
        );
        assert_eq!(
            payoff_message(&PayoffOutcome::PaidOff { months: 23 }),
            "You will pay off your debt in 23 months."
        );
    }

    #[test]
    fn test_payoff_response_flattens_outcome() {
        let outcome = PayoffOutcome::PaidOff { months: 23 };
        let value = serde_json::to_value(DebtPayoffResponse {
            message: payoff_message(&outcome),
            outcome,
        })
        .unwrap();
        assert_eq!(value["outcome"], "paid_off");
        assert_eq!(value["months"], 23);
    }

    #[tokio::test]
    async fn test_subscription_handler_message() {
        let Json(resp) = handle_subscription(Json(SubscriptionRequest {
            monthly_cut: 499.0,
            months: 12,
        }))
        .await
        .unwrap();
        assert_eq!(resp.savings, 5988.0);
        assert_eq!(
            resp.message,
            "You will save ₹5988 in 12 months by cancelling this subscription."
        );
    }

    #[tokio::test]
    async fn test_goal_handler_rejects_zero_saving() {
        let err = handle_goal_simulation(Json(GoalSimRequest {
            goal_amount: 1000.0,
            monthly_saving: 0.0,
        }))
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
