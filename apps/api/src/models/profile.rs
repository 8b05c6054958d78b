use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per user. Every figure is optional until onboarding fills it in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FinancialProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub savings_balance: Option<f64>,
    pub debt_amount: Option<f64>,
    pub credit_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
