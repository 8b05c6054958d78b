use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckInRow {
    pub user_id: Uuid,
    pub last_check_in: NaiveDate,
    pub streak: i32,
    pub best_streak: i32,
    pub updated_at: DateTime<Utc>,
}
