use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::checkin::{next_streak, store, Streak};
use crate::errors::AppError;
use crate::events::{ChangeEvent, Table};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub last_check_in: NaiveDate,
    #[serde(flatten)]
    pub streak: Streak,
}

/// POST /api/v1/check-in
pub async fn handle_check_in(
    State(state): State<AppState>,
    Json(req): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>, AppError> {
    let today = Utc::now().date_naive();
    let previous = store::get_check_in(&state.db, req.user_id).await?;
    let streak = next_streak(previous.as_ref(), today);

    if streak.already_checked_in {
        return Ok(Json(CheckInResponse {
            last_check_in: today,
            streak,
        }));
    }

    store::save_check_in(
        &state.db,
        req.user_id,
        today,
        streak.streak,
        streak.best_streak,
    )
    .await?;

    info!(
        "User {} checked in, streak {} (best {})",
        req.user_id, streak.streak, streak.best_streak
    );
    let event = if previous.is_some() {
        ChangeEvent::updated(Table::CheckIns, req.user_id, req.user_id)
    } else {
        ChangeEvent::inserted(Table::CheckIns, req.user_id, req.user_id)
    };
    state.events.publish(event);

    Ok(Json(CheckInResponse {
        last_check_in: today,
        streak,
    }))
}
