//! Profile grounding for the primary advisor.
//!
//! Loads everything the user has recorded and renders it into the system
//! prompt, then rewrites the user's message into a type-specific prompt.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::advice::models::{AdviceRequest, AdviceType};
use crate::advice::prompts::*;
use crate::budget::store::list_categories;
use crate::budget::current_month;
use crate::debts::store::list_debts;
use crate::goals::store::list_goals;
use crate::llm_client::prompts::{ADVISOR_GUIDELINES, ADVISOR_PERSONA};
use crate::models::budget::BudgetCategoryRow;
use crate::models::debt::{DebtRow, DebtStatus};
use crate::models::goal::FinancialGoalRow;
use crate::models::profile::FinancialProfileRow;
use crate::profile::store::get_profile;

/// Everything the advisor may mention about a user. All parts are optional for new users.
#[derive(Debug, Clone, Default)]
pub struct FinancialSnapshot {
    pub profile: Option<FinancialProfileRow>,
    pub goals: Vec<FinancialGoalRow>,
    pub debts: Vec<DebtRow>,
    pub budget: Vec<BudgetCategoryRow>,
}

pub async fn load_snapshot(pool: &PgPool, user_id: Uuid) -> Result<FinancialSnapshot, sqlx::Error> {
    let month = current_month(Utc::now().date_naive());
    let (profile, goals, debts, budget) = tokio::try_join!(
        get_profile(pool, user_id),
        list_goals(pool, user_id),
        list_debts(pool, user_id),
        list_categories(pool, user_id, &month),
    )?;
    Ok(FinancialSnapshot {
        profile,
        goals,
        debts,
        budget,
    })
}

/// Rupee amount, rounded to paise, without a trailing `.0`.
pub fn format_rupees(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    format!("₹{rounded}")
}

fn or_not_provided(value: Option<f64>) -> String {
    value
        .map(format_rupees)
        .unwrap_or_else(|| "Not provided".to_string())
}

pub fn render_system_prompt(snapshot: &FinancialSnapshot) -> String {
    let mut prompt = format!("{ADVISOR_PERSONA} ");

    match &snapshot.profile {
        Some(p) => {
            let profile = PROFILE_TEMPLATE
                .replace(
                    "{credit_score}",
                    &p.credit_score
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Not provided".to_string()),
                )
                .replace("{monthly_income}", &or_not_provided(p.monthly_income))
                .replace("{monthly_expenses}", &or_not_provided(p.monthly_expenses))
                .replace("{savings_balance}", &or_not_provided(p.savings_balance))
                .replace("{debt_amount}", &or_not_provided(p.debt_amount));
            prompt.push('\n');
            prompt.push_str(&profile);
        }
        None => {
            prompt.push('\n');
            prompt.push_str(NEW_USER_NOTE);
        }
    }

    if !snapshot.goals.is_empty() {
        let goals = snapshot
            .goals
            .iter()
            .map(|g| format!("{} ({})", g.title, format_rupees(g.target_amount)))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!("\nCurrent Goals: {goals}"));
    }

    let active_debts: Vec<String> = snapshot
        .debts
        .iter()
        .filter(|d| d.status == DebtStatus::Active.as_str())
        .map(|d| format!("{} ({})", d.name, format_rupees(d.amount)))
        .collect();
    if !active_debts.is_empty() {
        prompt.push_str(&format!(
            "\nActive Debts/Subscriptions: {}",
            active_debts.join(", ")
        ));
    }

    if !snapshot.budget.is_empty() {
        let budget = snapshot
            .budget
            .iter()
            .map(|b| format!("{}: {}", b.name, format_rupees(b.allocated_amount)))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!("\nBudget Categories: {budget}"));
    }

    prompt.push_str("\n\n");
    prompt.push_str(ADVISOR_GUIDELINES);
    prompt
}

/// Rewrites the user's message into the prompt for its advice type.
/// Plain chat passes the message through unchanged.
pub fn render_user_prompt(request: &AdviceRequest, snapshot: &FinancialSnapshot) -> String {
    let profile = snapshot.profile.as_ref();
    match request.advice_type {
        AdviceType::Explain => EXPLAIN_TEMPLATE.replace("{message}", &request.message),
        AdviceType::PurchaseAdvice => match request.purchase_context() {
            Some(ctx) => {
                let base = PURCHASE_TEMPLATE
                    .replace("{item_name}", &ctx.item_name)
                    .replace("{item_price}", &format_rupees(ctx.item_price));
                let suffix = if profile.is_some() {
                    PURCHASE_WITH_PROFILE_SUFFIX
                } else {
                    PURCHASE_NO_PROFILE_SUFFIX
                };
                format!("{base}{suffix}")
            }
            None => request.message.clone(),
        },
        AdviceType::BudgetHelp => match profile.and_then(|p| p.monthly_income) {
            Some(income) => {
                BUDGET_WITH_INCOME_TEMPLATE.replace("{monthly_income}", &format_rupees(income))
            }
            None => BUDGET_NO_INCOME.to_string(),
        },
        AdviceType::CreditImprovement => match profile.and_then(|p| p.credit_score) {
            Some(score) => CREDIT_WITH_SCORE_TEMPLATE.replace("{credit_score}", &score.to_string()),
            None => CREDIT_NO_SCORE.to_string(),
        },
        AdviceType::SubscriptionOpt => {
            if snapshot.debts.is_empty() {
                SUBSCRIPTIONS_NO_DATA.to_string()
            } else {
                SUBSCRIPTIONS_WITH_DATA.to_string()
            }
        }
        AdviceType::UtilityOpt => UTILITY_PROMPT.to_string(),
        AdviceType::NextSteps => NEXT_STEPS_TEMPLATE
            .replace("{message}", &request.message)
            .trim_end()
            .to_string(),
        AdviceType::Chat => request.message.clone(),
    }
}

/// Prompt for the direct fallback, which knows nothing about the user's profile.
/// Equivalent to the grounded prompt minus the profile-dependent wording.
pub fn render_fallback_prompt(request: &AdviceRequest) -> String {
    match request.advice_type {
        AdviceType::Explain => EXPLAIN_TEMPLATE.replace("{message}", &request.message),
        AdviceType::PurchaseAdvice => match request.purchase_context() {
            Some(ctx) => PURCHASE_TEMPLATE
                .replace("{item_name}", &ctx.item_name)
                .replace("{item_price}", &format_rupees(ctx.item_price)),
            None => request.message.clone(),
        },
        _ => request.message.clone(),
    }
}
