use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::events::{ChangeEvent, Table};
use crate::models::profile::FinancialProfileRow;
use crate::profile::store::{self, ProfileFields};
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::validation::{optional_credit_score, optional_non_negative};

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub user_id: Uuid,
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub savings_balance: Option<f64>,
    pub debt_amount: Option<f64>,
    pub credit_score: Option<i32>,
}

impl UpsertProfileRequest {
    fn validate(&self) -> Result<ProfileFields, AppError> {
        optional_non_negative("monthly_income", self.monthly_income)?;
        optional_non_negative("monthly_expenses", self.monthly_expenses)?;
        optional_non_negative("savings_balance", self.savings_balance)?;
        optional_non_negative("debt_amount", self.debt_amount)?;
        optional_credit_score(self.credit_score)?;
        Ok(ProfileFields {
            monthly_income: self.monthly_income,
            monthly_expenses: self.monthly_expenses,
            savings_balance: self.savings_balance,
            debt_amount: self.debt_amount,
            credit_score: self.credit_score,
        })
    }
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<FinancialProfileRow>, AppError> {
    store::get_profile(&state.db, params.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Financial profile not found".to_string()))
}

/// PUT /api/v1/profile
///
/// Creates the profile on first call; afterwards only the supplied figures change.
pub async fn handle_upsert_profile(
    State(state): State<AppState>,
    Json(req): Json<UpsertProfileRequest>,
) -> Result<Json<FinancialProfileRow>, AppError> {
    let fields = req.validate()?;
    let (row, created) = store::upsert_profile(&state.db, req.user_id, fields).await?;

    info!(
        "Profile {} for user {}",
        if created { "created" } else { "updated" },
        req.user_id
    );
    state.events.publish(if created {
        ChangeEvent::inserted(Table::FinancialProfiles, req.user_id, row.id)
    } else {
        ChangeEvent::updated(Table::FinancialProfiles, req.user_id, row.id)
    });

    Ok(Json(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(credit_score: Option<i32>, income: Option<f64>) -> UpsertProfileRequest {
        UpsertProfileRequest {
            user_id: Uuid::new_v4(),
            monthly_income: income,
            monthly_expenses: Some(30000.0),
            savings_balance: None,
            debt_amount: None,
            credit_score,
        }
    }

    #[test]
    fn test_validate_passes_partial_profile() {
        let fields = request(Some(742), Some(85000.0)).validate().unwrap();
        assert_eq!(fields.monthly_income, Some(85000.0));
        assert_eq!(fields.savings_balance, None);
    }

    #[test]
    fn test_validate_rejects_out_of_range_credit_score() {
        assert!(matches!(
            request(Some(950), None).validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_income() {
        assert!(matches!(
            request(None, Some(-1.0)).validate(),
            Err(AppError::Validation(_))
        ));
    }
}
