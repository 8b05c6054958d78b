use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BudgetCategoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub allocated_amount: f64,
    pub spent_amount: f64,
    /// `YYYY-MM`
    pub month_year: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
