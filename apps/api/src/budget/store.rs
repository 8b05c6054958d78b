use sqlx::PgPool;
use uuid::Uuid;

use crate::models::budget::BudgetCategoryRow;

pub struct NewCategory<'a> {
    pub name: &'a str,
    pub allocated_amount: f64,
    pub spent_amount: f64,
    pub month_year: &'a str,
}

/// Fields to change. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct CategoryChanges<'a> {
    pub name: Option<&'a str>,
    pub allocated_amount: Option<f64>,
    pub spent_amount: Option<f64>,
}

pub async fn list_categories(
    pool: &PgPool,
    user_id: Uuid,
    month_year: &str,
) -> Result<Vec<BudgetCategoryRow>, sqlx::Error> {
    sqlx::query_as::<_, BudgetCategoryRow>(
        r#"
        SELECT * FROM budget_categories
        WHERE user_id = $1 AND month_year = $2
        ORDER BY created_at
        "#,
    )
    .bind(user_id)
    .bind(month_year)
    .fetch_all(pool)
    .await
}

pub async fn insert_category(
    pool: &PgPool,
    user_id: Uuid,
    category: NewCategory<'_>,
) -> Result<BudgetCategoryRow, sqlx::Error> {
    sqlx::query_as::<_, BudgetCategoryRow>(
        r#"
        INSERT INTO budget_categories (user_id, name, allocated_amount, spent_amount, month_year)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(category.name)
    .bind(category.allocated_amount)
    .bind(category.spent_amount)
    .bind(category.month_year)
    .fetch_one(pool)
    .await
}

/// `None` when no category with `id` belongs to `user_id`.
pub async fn update_category(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    changes: CategoryChanges<'_>,
) -> Result<Option<BudgetCategoryRow>, sqlx::Error> {
    sqlx::query_as::<_, BudgetCategoryRow>(
        r#"
        UPDATE budget_categories SET
            name             = COALESCE($3, name),
            allocated_amount = COALESCE($4, allocated_amount),
            spent_amount     = COALESCE($5, spent_amount),
            updated_at       = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(changes.name)
    .bind(changes.allocated_amount)
    .bind(changes.spent_amount)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was removed.
pub async fn delete_category(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM budget_categories WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
