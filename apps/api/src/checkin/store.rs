use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::check_in::CheckInRow;

pub async fn get_check_in(pool: &PgPool, user_id: Uuid) -> Result<Option<CheckInRow>, sqlx::Error> {
    sqlx::query_as::<_, CheckInRow>("SELECT * FROM check_ins WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn save_check_in(
    pool: &PgPool,
    user_id: Uuid,
    day: NaiveDate,
    streak: i32,
    best_streak: i32,
) -> Result<CheckInRow, sqlx::Error> {
    sqlx::query_as::<_, CheckInRow>(
        r#"
        INSERT INTO check_ins (user_id, last_check_in, streak, best_streak)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id) DO UPDATE SET
            last_check_in = EXCLUDED.last_check_in,
            streak        = EXCLUDED.streak,
            best_streak   = EXCLUDED.best_streak,
            updated_at    = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(day)
    .bind(streak)
    .bind(best_streak)
    .fetch_one(pool)
    .await
}
