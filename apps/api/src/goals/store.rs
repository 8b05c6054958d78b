use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::goal::{FinancialGoalRow, GoalStatus};

pub struct NewGoal<'a> {
    pub title: &'a str,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<NaiveDate>,
    pub category: Option<&'a str>,
    pub status: GoalStatus,
}

pub async fn list_goals(pool: &PgPool, user_id: Uuid) -> Result<Vec<FinancialGoalRow>, sqlx::Error> {
    sqlx::query_as::<_, FinancialGoalRow>(
        "SELECT * FROM financial_goals WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn get_goal(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<FinancialGoalRow>, sqlx::Error> {
    sqlx::query_as::<_, FinancialGoalRow>(
        "SELECT * FROM financial_goals WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_goal(
    pool: &PgPool,
    user_id: Uuid,
    goal: NewGoal<'_>,
) -> Result<FinancialGoalRow, sqlx::Error> {
    sqlx::query_as::<_, FinancialGoalRow>(
        r#"
        INSERT INTO financial_goals
            (user_id, title, target_amount, current_amount, target_date, category, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(goal.title)
    .bind(goal.target_amount)
    .bind(goal.current_amount)
    .bind(goal.target_date)
    .bind(goal.category)
    .bind(goal.status.as_str())
    .fetch_one(pool)
    .await
}

/// Writes every mutable column of `goal` back. Last write wins.
pub async fn save_goal(
    pool: &PgPool,
    goal: &FinancialGoalRow,
) -> Result<Option<FinancialGoalRow>, sqlx::Error> {
    sqlx::query_as::<_, FinancialGoalRow>(
        r#"
        UPDATE financial_goals SET
            title          = $3,
            target_amount  = $4,
            current_amount = $5,
            target_date    = $6,
            category       = $7,
            status         = $8,
            updated_at     = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(goal.id)
    .bind(goal.user_id)
    .bind(&goal.title)
    .bind(goal.target_amount)
    .bind(goal.current_amount)
    .bind(goal.target_date)
    .bind(&goal.category)
    .bind(&goal.status)
    .fetch_optional(pool)
    .await
}

pub async fn delete_goal(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM financial_goals WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
