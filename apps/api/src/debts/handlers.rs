use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculators::debt::{days_until_due, is_upcoming, monthly_equivalent};
use crate::debts::store::{self, DebtChanges, NewDebt};
use crate::errors::AppError;
use crate::events::{ChangeEvent, Table};
use crate::models::debt::{DebtKind, DebtRow, DebtStatus, Frequency};
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::validation::{optional_positive, optional_text, require_positive, require_text};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DebtView {
    #[serde(flatten)]
    pub debt: DebtRow,
    pub monthly_equivalent: f64,
    pub days_until_due: Option<i64>,
}

impl DebtView {
    pub fn new(debt: DebtRow, today: NaiveDate) -> Self {
        let frequency = Frequency::parse(&debt.frequency).unwrap_or(Frequency::Monthly);
        Self {
            monthly_equivalent: monthly_equivalent(debt.amount, frequency),
            days_until_due: debt.due_date.map(|due| days_until_due(due, today)),
            debt,
        }
    }

    fn is_active(&self) -> bool {
        self.debt.status == DebtStatus::Active.as_str()
    }
}

#[derive(Debug, Serialize)]
pub struct DebtListResponse {
    pub active: Vec<DebtView>,
    pub paid: Vec<DebtView>,
    /// Monthly cost of everything still active.
    pub monthly_total: f64,
    /// Ids of active items due within the upcoming window.
    pub upcoming: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDebtRequest {
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DebtKind,
    pub amount: f64,
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_frequency")]
    pub frequency: Frequency,
}

fn default_frequency() -> Frequency {
    Frequency::Monthly
}

#[derive(Debug, Deserialize)]
pub struct UpdateDebtRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<DebtKind>,
    pub amount: Option<f64>,
    /// Explicit `null` clears the due date; an absent field keeps it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub due_date: Option<Option<NaiveDate>>,
    pub frequency: Option<Frequency>,
}

#[derive(Debug, Deserialize)]
pub struct MarkPaidRequest {
    pub user_id: Uuid,
}

fn not_found() -> AppError {
    AppError::NotFound("Debt or subscription not found".to_string())
}

pub fn summarize(rows: Vec<DebtRow>, today: NaiveDate) -> DebtListResponse {
    let (active, paid): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .map(|row| DebtView::new(row, today))
        .partition(DebtView::is_active);

    DebtListResponse {
        monthly_total: active.iter().map(|v| v.monthly_equivalent).sum(),
        upcoming: active
            .iter()
            .filter(|v| v.debt.due_date.is_some_and(|due| is_upcoming(due, today)))
            .map(|v| v.debt.id)
            .collect(),
        active,
        paid,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/debts
pub async fn handle_list_debts(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DebtListResponse>, AppError> {
    let rows = store::list_debts(&state.db, params.user_id).await?;
    Ok(Json(summarize(rows, Utc::now().date_naive())))
}

/// POST /api/v1/debts
pub async fn handle_create_debt(
    State(state): State<AppState>,
    Json(req): Json<CreateDebtRequest>,
) -> Result<(StatusCode, Json<DebtView>), AppError> {
    require_text("name", &req.name)?;
    require_positive("amount", req.amount)?;

    let row = store::insert_debt(
        &state.db,
        req.user_id,
        NewDebt {
            name: req.name.trim(),
            kind: req.kind,
            amount: req.amount,
            due_date: req.due_date,
            frequency: req.frequency,
        },
    )
    .await?;

    info!(
        "{} '{}' added for user {}",
        req.kind.as_str(),
        row.name,
        req.user_id
    );
    state
        .events
        .publish(ChangeEvent::inserted(Table::DebtsSubscriptions, req.user_id, row.id));

    Ok((
        StatusCode::CREATED,
        Json(DebtView::new(row, Utc::now().date_naive())),
    ))
}

/// PATCH /api/v1/debts/:id
pub async fn handle_update_debt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDebtRequest>,
) -> Result<Json<DebtView>, AppError> {
    optional_text("name", req.name.as_deref())?;
    optional_positive("amount", req.amount)?;

    let row = store::update_debt(
        &state.db,
        req.user_id,
        id,
        DebtChanges {
            name: req.name.as_deref().map(str::trim),
            kind: req.kind,
            amount: req.amount,
            due_date: req.due_date,
            frequency: req.frequency,
        },
    )
    .await?
    .ok_or_else(not_found)?;

    state
        .events
        .publish(ChangeEvent::updated(Table::DebtsSubscriptions, req.user_id, id));

    Ok(Json(DebtView::new(row, Utc::now().date_naive())))
}

/// POST /api/v1/debts/:id/paid
pub async fn handle_mark_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MarkPaidRequest>,
) -> Result<Json<DebtView>, AppError> {
    let row = store::set_status(&state.db, req.user_id, id, DebtStatus::Paid)
        .await?
        .ok_or_else(not_found)?;

    info!("'{}' marked paid for user {}", row.name, req.user_id);
    state
        .events
        .publish(ChangeEvent::updated(Table::DebtsSubscriptions, req.user_id, id));

    Ok(Json(DebtView::new(row, Utc::now().date_naive())))
}

/// DELETE /api/v1/debts/:id
pub async fn handle_delete_debt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !store::delete_debt(&state.db, params.user_id, id).await? {
        return Err(not_found());
    }
    state
        .events
        .publish(ChangeEvent::deleted(Table::DebtsSubscriptions, params.user_id, id));
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(amount: f64, frequency: &str, status: &str, due: Option<NaiveDate>) -> DebtRow {
        let now = Utc::now();
        DebtRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Streaming".into(),
            kind: "subscription".into(),
            amount,
            due_date: due,
            frequency: frequency.into(),
            status: status.into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_summary_totals_active_monthly_cost() {
        let today = date(2026, 4, 1);
        let list = summarize(
            vec![
                row(1200.0, "yearly", "active", None),
                row(500.0, "monthly", "active", None),
                row(9999.0, "monthly", "paid", None),
            ],
            today,
        );
        assert_eq!(list.active.len(), 2);
        assert_eq!(list.paid.len(), 1);
        assert_eq!(list.monthly_total, 600.0);
    }

    #[test]
    fn test_summary_flags_upcoming_active_items_only() {
        let today = date(2026, 4, 1);
        let soon = row(500.0, "monthly", "active", Some(date(2026, 4, 5)));
        let later = row(500.0, "monthly", "active", Some(date(2026, 4, 20)));
        let paid_soon = row(500.0, "monthly", "paid", Some(date(2026, 4, 2)));
        let soon_id = soon.id;

        let list = summarize(vec![soon, later, paid_soon], today);
        assert_eq!(list.upcoming, vec![soon_id]);
        assert_eq!(list.active[0].days_until_due, Some(4));
    }

    #[test]
    fn test_create_request_reads_type_and_defaults_frequency() {
        let req: CreateDebtRequest = serde_json::from_value(json!({
            "user_id": Uuid::new_v4(),
            "name": "Car loan",
            "type": "debt",
            "amount": 12000.0
        }))
        .unwrap();
        assert_eq!(req.kind, DebtKind::Debt);
        assert_eq!(req.frequency, Frequency::Monthly);
    }

    #[test]
    fn test_update_request_null_due_date_clears() {
        let user_id = Uuid::new_v4();
        let cleared: UpdateDebtRequest =
            serde_json::from_value(json!({"user_id": user_id, "due_date": null})).unwrap();
        assert_eq!(cleared.due_date, Some(None));

        let kept: UpdateDebtRequest =
            serde_json::from_value(json!({"user_id": user_id, "amount": 450.0})).unwrap();
        assert_eq!(kept.due_date, None);

        let moved: UpdateDebtRequest =
            serde_json::from_value(json!({"user_id": user_id, "due_date": "2026-05-10"}))
                .unwrap();
        assert_eq!(moved.due_date, Some(Some(date(2026, 5, 10))));
    }

    #[test]
    fn test_view_serializes_kind_as_type() {
        let value = serde_json::to_value(DebtView::new(
            row(300.0, "weekly", "active", None),
            date(2026, 4, 1),
        ))
        .unwrap();
        assert_eq!(value["type"], "subscription");
        assert_eq!(value["monthly_equivalent"], 1200.0);
    }
}
