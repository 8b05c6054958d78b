use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculators::goals::{
    expected_percentage, goal_percentage, goal_status, monthly_saving_suggestion, time_to_goal,
};
use crate::errors::AppError;
use crate::events::{ChangeEvent, Table};
use crate::goals::store::{self, NewGoal};
use crate::models::goal::{FinancialGoalRow, GoalStatus};
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::validation::{
    optional_positive, optional_text, require_non_negative, require_positive, require_text,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: FinancialGoalRow,
    pub percentage: Option<f64>,
    pub time_left: Option<String>,
    pub expected_percentage: Option<f64>,
    pub monthly_saving_needed: Option<f64>,
}

impl GoalView {
    pub fn new(goal: FinancialGoalRow, today: NaiveDate) -> Self {
        let active = goal.status == GoalStatus::Active.as_str();
        let pacing = goal.target_date.filter(|_| active);
        Self {
            percentage: goal_percentage(goal.current_amount, goal.target_amount),
            time_left: pacing.map(|date| time_to_goal(date, today)),
            expected_percentage: pacing
                .map(|date| expected_percentage(goal.created_at.date_naive(), date, today)),
            monthly_saving_needed: pacing.and_then(|date| {
                monthly_saving_suggestion(goal.current_amount, goal.target_amount, date, today)
            }),
            goal,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GoalListResponse {
    pub active: Vec<GoalView>,
    pub completed: Vec<GoalView>,
    /// Sums over active goals.
    pub total_target: f64,
    pub total_saved: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub user_id: Uuid,
    pub title: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub target_date: Option<NaiveDate>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateGoalRequest {
    pub user_id: Uuid,
    pub title: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    /// Explicit `null` clears the date; an absent field keeps it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub target_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub category: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub user_id: Uuid,
    pub amount: f64,
}

fn not_found() -> AppError {
    AppError::NotFound("Goal not found".to_string())
}

/// Applies the edits and recomputes `status` from the resulting amounts.
pub fn apply_update(goal: &mut FinancialGoalRow, req: &UpdateGoalRequest) {
    if let Some(title) = &req.title {
        goal.title = title.trim().to_string();
    }
    if let Some(target) = req.target_amount {
        goal.target_amount = target;
    }
    if let Some(current) = req.current_amount {
        goal.current_amount = current;
    }
    if let Some(target_date) = req.target_date {
        goal.target_date = target_date;
    }
    if let Some(category) = &req.category {
        goal.category = category.clone();
    }
    goal.status = goal_status(goal.current_amount, goal.target_amount)
        .as_str()
        .to_string();
}

pub fn apply_progress(goal: &mut FinancialGoalRow, amount: f64) {
    goal.current_amount += amount;
    goal.status = goal_status(goal.current_amount, goal.target_amount)
        .as_str()
        .to_string();
}

pub fn split_goals(goals: Vec<FinancialGoalRow>, today: NaiveDate) -> GoalListResponse {
    let (completed, active): (Vec<_>, Vec<_>) = goals
        .into_iter()
        .map(|goal| GoalView::new(goal, today))
        .partition(|view| view.goal.status == GoalStatus::Completed.as_str());

    GoalListResponse {
        total_target: active.iter().map(|v| v.goal.target_amount).sum(),
        total_saved: active.iter().map(|v| v.goal.current_amount).sum(),
        active,
        completed,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/goals
pub async fn handle_list_goals(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<GoalListResponse>, AppError> {
    let goals = store::list_goals(&state.db, params.user_id).await?;
    Ok(Json(split_goals(goals, Utc::now().date_naive())))
}

/// POST /api/v1/goals
pub async fn handle_create_goal(
    State(state): State<AppState>,
    Json(req): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<GoalView>), AppError> {
    require_text("title", &req.title)?;
    require_positive("target_amount", req.target_amount)?;
    require_non_negative("current_amount", req.current_amount)?;

    let row = store::insert_goal(
        &state.db,
        req.user_id,
        NewGoal {
            title: req.title.trim(),
            target_amount: req.target_amount,
            current_amount: req.current_amount,
            target_date: req.target_date,
            category: req.category.as_deref(),
            status: goal_status(req.current_amount, req.target_amount),
        },
    )
    .await?;

    info!("Goal '{}' created for user {}", row.title, req.user_id);
    state
        .events
        .publish(ChangeEvent::inserted(Table::FinancialGoals, req.user_id, row.id));

    Ok((
        StatusCode::CREATED,
        Json(GoalView::new(row, Utc::now().date_naive())),
    ))
}

/// PATCH /api/v1/goals/:id
pub async fn handle_update_goal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateGoalRequest>,
) -> Result<Json<GoalView>, AppError> {
    optional_text("title", req.title.as_deref())?;
    optional_positive("target_amount", req.target_amount)?;
    if let Some(current) = req.current_amount {
        require_non_negative("current_amount", current)?;
    }

    let mut goal = store::get_goal(&state.db, req.user_id, id)
        .await?
        .ok_or_else(not_found)?;
    apply_update(&mut goal, &req);
    let saved = store::save_goal(&state.db, &goal)
        .await?
        .ok_or_else(not_found)?;

    state
        .events
        .publish(ChangeEvent::updated(Table::FinancialGoals, req.user_id, id));

    Ok(Json(GoalView::new(saved, Utc::now().date_naive())))
}

/// POST /api/v1/goals/:id/progress
pub async fn handle_add_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProgressRequest>,
) -> Result<Json<GoalView>, AppError> {
    require_positive("amount", req.amount)?;

    let mut goal = store::get_goal(&state.db, req.user_id, id)
        .await?
        .ok_or_else(not_found)?;
    let was_active = goal.status == GoalStatus::Active.as_str();
    apply_progress(&mut goal, req.amount);
    let saved = store::save_goal(&state.db, &goal)
        .await?
        .ok_or_else(not_found)?;

    if was_active && saved.status == GoalStatus::Completed.as_str() {
        info!("Goal '{}' completed for user {}", saved.title, req.user_id);
    }
    state
        .events
        .publish(ChangeEvent::updated(Table::FinancialGoals, req.user_id, id));

    Ok(Json(GoalView::new(saved, Utc::now().date_naive())))
}

/// DELETE /api/v1/goals/:id
pub async fn handle_delete_goal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !store::delete_goal(&state.db, params.user_id, id).await? {
        return Err(not_found());
    }
    state
        .events
        .publish(ChangeEvent::deleted(Table::FinancialGoals, params.user_id, id));
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(current: f64, target: f64, target_date: Option<NaiveDate>) -> FinancialGoalRow {
        let created = date(2026, 1, 1).and_hms_opt(0, 0, 0).unwrap().and_utc();
        FinancialGoalRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Emergency fund".into(),
            target_amount: target,
            current_amount: current,
            target_date,
            category: Some("savings".into()),
            status: goal_status(current, target).as_str().to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_progress_completes_goal_at_target() {
        let mut g = goal(40000.0, 50000.0, None);
        apply_progress(&mut g, 10000.0);
        assert_eq!(g.current_amount, 50000.0);
        assert_eq!(g.status, "completed");
    }

    #[test]
    fn test_raising_target_reopens_goal() {
        let mut g = goal(50000.0, 50000.0, None);
        assert_eq!(g.status, "completed");
        let user_id = g.user_id;
        apply_update(
            &mut g,
            &UpdateGoalRequest {
                user_id,
                target_amount: Some(80000.0),
                ..Default::default()
            },
        );
        assert_eq!(g.status, "active");
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let mut g = goal(1000.0, 50000.0, Some(date(2026, 7, 1)));
        let user_id = g.user_id;

        let keep: UpdateGoalRequest =
            serde_json::from_value(serde_json::json!({"user_id": user_id, "title": "Trip"}))
                .unwrap();
        apply_update(&mut g, &keep);
        assert_eq!(g.target_date, Some(date(2026, 7, 1)));
        assert_eq!(g.category.as_deref(), Some("savings"));

        let clear: UpdateGoalRequest = serde_json::from_value(serde_json::json!({
            "user_id": user_id,
            "target_date": null,
            "category": null
        }))
        .unwrap();
        apply_update(&mut g, &clear);
        assert_eq!(g.target_date, None);
        assert_eq!(g.category, None);
        assert_eq!(g.title, "Trip");
    }

    #[test]
    fn test_view_paces_active_goal_with_date() {
        let view = GoalView::new(
            goal(20000.0, 50000.0, Some(date(2026, 7, 1))),
            date(2026, 4, 1),
        );
        assert_eq!(view.percentage, Some(40.0));
        assert_eq!(view.time_left.as_deref(), Some("3 months"));
        assert_eq!(view.monthly_saving_needed, Some(10000.0));
        assert!(view.expected_percentage.unwrap() > 40.0);
    }

    #[test]
    fn test_view_skips_pacing_for_completed_goal() {
        let view = GoalView::new(
            goal(50000.0, 50000.0, Some(date(2026, 7, 1))),
            date(2026, 4, 1),
        );
        assert_eq!(view.percentage, Some(100.0));
        assert!(view.time_left.is_none());
        assert!(view.monthly_saving_needed.is_none());
    }

    #[test]
    fn test_split_totals_only_active() {
        let today = date(2026, 4, 1);
        let list = split_goals(
            vec![goal(10000.0, 50000.0, None), goal(5000.0, 5000.0, None)],
            today,
        );
        assert_eq!(list.active.len(), 1);
        assert_eq!(list.completed.len(), 1);
        assert_eq!(list.total_target, 50000.0);
        assert_eq!(list.total_saved, 10000.0);
    }
}
