use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::debt::{DebtKind, DebtRow, DebtStatus, Frequency};

pub struct NewDebt<'a> {
    pub name: &'a str,
    pub kind: DebtKind,
    pub amount: f64,
    pub due_date: Option<NaiveDate>,
    pub frequency: Frequency,
}

/// Fields to change. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct DebtChanges<'a> {
    pub name: Option<&'a str>,
    pub kind: Option<DebtKind>,
    pub amount: Option<f64>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<NaiveDate>>,
    pub frequency: Option<Frequency>,
}

pub async fn list_debts(pool: &PgPool, user_id: Uuid) -> Result<Vec<DebtRow>, sqlx::Error> {
    sqlx::query_as::<_, DebtRow>(
        r#"
        SELECT * FROM debts_subscriptions
        WHERE user_id = $1
        ORDER BY due_date ASC NULLS LAST, created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_debt(
    pool: &PgPool,
    user_id: Uuid,
    debt: NewDebt<'_>,
) -> Result<DebtRow, sqlx::Error> {
    sqlx::query_as::<_, DebtRow>(
        r#"
        INSERT INTO debts_subscriptions (user_id, name, kind, amount, due_date, frequency)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(debt.name)
    .bind(debt.kind.as_str())
    .bind(debt.amount)
    .bind(debt.due_date)
    .bind(debt.frequency.as_str())
    .fetch_one(pool)
    .await
}

pub async fn update_debt(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    changes: DebtChanges<'_>,
) -> Result<Option<DebtRow>, sqlx::Error> {
    sqlx::query_as::<_, DebtRow>(
        r#"
        UPDATE debts_subscriptions SET
            name       = COALESCE($3, name),
            kind       = COALESCE($4, kind),
            amount     = COALESCE($5, amount),
            due_date   = CASE WHEN $8 THEN $6 ELSE due_date END,
            frequency  = COALESCE($7, frequency),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(changes.name)
    .bind(changes.kind.map(|k| k.as_str()))
    .bind(changes.amount)
    .bind(changes.due_date.flatten())
    .bind(changes.frequency.map(|f| f.as_str()))
    .bind(changes.due_date.is_some())
    .fetch_optional(pool)
    .await
}

pub async fn set_status(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    status: DebtStatus,
) -> Result<Option<DebtRow>, sqlx::Error> {
    sqlx::query_as::<_, DebtRow>(
        r#"
        UPDATE debts_subscriptions SET status = $3, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await
}

pub async fn delete_debt(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM debts_subscriptions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
