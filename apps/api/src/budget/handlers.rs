use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::budget::current_month;
use crate::budget::store::{self, CategoryChanges, NewCategory};
use crate::calculators::budget::{
    budget_health, budget_percentage, budget_totals, BudgetHealth, BudgetTotals,
};
use crate::errors::AppError;
use crate::events::{ChangeEvent, Table};
use crate::models::budget::BudgetCategoryRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::validation::{
    optional_non_negative, optional_positive, optional_text, require_month, require_non_negative,
    require_positive, require_text,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BudgetListQuery {
    pub user_id: Uuid,
    /// Defaults to the current month.
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: BudgetCategoryRow,
    pub percentage: Option<f64>,
    pub health: Option<BudgetHealth>,
}

impl From<BudgetCategoryRow> for CategoryView {
    fn from(category: BudgetCategoryRow) -> Self {
        Self {
            percentage: budget_percentage(category.allocated_amount, category.spent_amount),
            health: budget_health(category.allocated_amount, category.spent_amount),
            category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BudgetListResponse {
    pub month: String,
    pub categories: Vec<CategoryView>,
    pub totals: BudgetTotals,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub user_id: Uuid,
    pub name: String,
    pub allocated_amount: f64,
    #[serde(default)]
    pub spent_amount: f64,
    pub month_year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub allocated_amount: Option<f64>,
    pub spent_amount: Option<f64>,
}

fn not_found() -> AppError {
    AppError::NotFound("Budget category not found".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/budget
pub async fn handle_list_budget(
    State(state): State<AppState>,
    Query(params): Query<BudgetListQuery>,
) -> Result<Json<BudgetListResponse>, AppError> {
    let month = params
        .month
        .unwrap_or_else(|| current_month(Utc::now().date_naive()));
    require_month(&month)?;

    let rows = store::list_categories(&state.db, params.user_id, &month).await?;
    let totals = budget_totals(rows.iter().map(|r| (r.allocated_amount, r.spent_amount)));

    Ok(Json(BudgetListResponse {
        month,
        categories: rows.into_iter().map(CategoryView::from).collect(),
        totals,
    }))
}

/// POST /api/v1/budget
pub async fn handle_create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryView>), AppError> {
    require_text("name", &req.name)?;
    require_positive("allocated_amount", req.allocated_amount)?;
    require_non_negative("spent_amount", req.spent_amount)?;
    let month = req
        .month_year
        .clone()
        .unwrap_or_else(|| current_month(Utc::now().date_naive()));
    require_month(&month)?;

    let row = store::insert_category(
        &state.db,
        req.user_id,
        NewCategory {
            name: req.name.trim(),
            allocated_amount: req.allocated_amount,
            spent_amount: req.spent_amount,
            month_year: &month,
        },
    )
    .await?;

    info!("Budget category '{}' created for {month}", row.name);
    state
        .events
        .publish(ChangeEvent::inserted(Table::BudgetCategories, req.user_id, row.id));

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// PATCH /api/v1/budget/:id
pub async fn handle_update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryView>, AppError> {
    optional_text("name", req.name.as_deref())?;
    optional_positive("allocated_amount", req.allocated_amount)?;
    optional_non_negative("spent_amount", req.spent_amount)?;

    let row = store::update_category(
        &state.db,
        req.user_id,
        id,
        CategoryChanges {
            name: req.name.as_deref().map(str::trim),
            allocated_amount: req.allocated_amount,
            spent_amount: req.spent_amount,
        },
    )
    .await?
    .ok_or_else(not_found)?;

    state
        .events
        .publish(ChangeEvent::updated(Table::BudgetCategories, req.user_id, id));

    Ok(Json(row.into()))
}

/// DELETE /api/v1/budget/:id
pub async fn handle_delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !store::delete_category(&state.db, params.user_id, id).await? {
        return Err(not_found());
    }

    info!("Budget category {id} deleted");
    state
        .events
        .publish(ChangeEvent::deleted(Table::BudgetCategories, params.user_id, id));

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(allocated: f64, spent: f64) -> BudgetCategoryRow {
        let now = Utc::now();
        BudgetCategoryRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Groceries".into(),
            allocated_amount: allocated,
            spent_amount: spent,
            month_year: "2026-04".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_category_view_derives_percentage_and_health() {
        let view = CategoryView::from(row(10000.0, 8000.0));
        assert_eq!(view.percentage, Some(80.0));
        assert_eq!(view.health, Some(BudgetHealth::Warning));
    }

    #[test]
    fn test_category_view_serializes_flat() {
        let value = serde_json::to_value(CategoryView::from(row(5000.0, 6000.0))).unwrap();
        assert_eq!(value["name"], "Groceries");
        assert_eq!(value["percentage"], 100.0);
        assert_eq!(value["health"], "over_budget");
    }
}
