use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::FinancialProfileRow;

/// Profile figures as submitted. `None` leaves the stored value untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileFields {
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub savings_balance: Option<f64>,
    pub debt_amount: Option<f64>,
    pub credit_score: Option<i32>,
}

pub async fn get_profile(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<FinancialProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, FinancialProfileRow>(
        "SELECT * FROM financial_profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Inserts the profile or merges the supplied fields into the existing row.
/// Returns the stored row and whether it was newly created.
pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    fields: ProfileFields,
) -> Result<(FinancialProfileRow, bool), sqlx::Error> {
    let row = sqlx::query_as::<_, FinancialProfileRow>(
        r#"
        INSERT INTO financial_profiles
            (user_id, monthly_income, monthly_expenses, savings_balance, debt_amount, credit_score)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id) DO UPDATE SET
            monthly_income   = COALESCE(EXCLUDED.monthly_income,   financial_profiles.monthly_income),
            monthly_expenses = COALESCE(EXCLUDED.monthly_expenses, financial_profiles.monthly_expenses),
            savings_balance  = COALESCE(EXCLUDED.savings_balance,  financial_profiles.savings_balance),
            debt_amount      = COALESCE(EXCLUDED.debt_amount,      financial_profiles.debt_amount),
            credit_score     = COALESCE(EXCLUDED.credit_score,     financial_profiles.credit_score),
            updated_at       = clock_timestamp()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(fields.monthly_income)
    .bind(fields.monthly_expenses)
    .bind(fields.savings_balance)
    .bind(fields.debt_amount)
    .bind(fields.credit_score)
    .fetch_one(pool)
    .await?;

    // Fresh inserts take both timestamps from the same now().
    let created = row.created_at == row.updated_at;
    Ok((row, created))
}
