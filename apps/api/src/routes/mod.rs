pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;
use crate::{advice, budget, calculators, checkin, debts, events, goals, profile};

/// Owner of the rows a request reads or deletes. Authentication happens in
/// front of this service; handlers only scope queries by it.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile & ledger CRUD
        .route(
            "/api/v1/profile",
            get(profile::handlers::handle_get_profile).put(profile::handlers::handle_upsert_profile),
        )
        .route(
            "/api/v1/budget",
            get(budget::handlers::handle_list_budget).post(budget::handlers::handle_create_category),
        )
        .route(
            "/api/v1/budget/:id",
            patch(budget::handlers::handle_update_category)
                .delete(budget::handlers::handle_delete_category),
        )
        .route(
            "/api/v1/goals",
            get(goals::handlers::handle_list_goals).post(goals::handlers::handle_create_goal),
        )
        .route(
            "/api/v1/goals/:id",
            patch(goals::handlers::handle_update_goal).delete(goals::handlers::handle_delete_goal),
        )
        .route(
            "/api/v1/goals/:id/progress",
            post(goals::handlers::handle_add_progress),
        )
        .route(
            "/api/v1/debts",
            get(debts::handlers::handle_list_debts).post(debts::handlers::handle_create_debt),
        )
        .route(
            "/api/v1/debts/:id",
            patch(debts::handlers::handle_update_debt).delete(debts::handlers::handle_delete_debt),
        )
        .route("/api/v1/debts/:id/paid", post(debts::handlers::handle_mark_paid))
        .route("/api/v1/check-in", post(checkin::handlers::handle_check_in))
        // Advice
        .route("/api/v1/advice", post(advice::handlers::handle_advice))
        .route(
            "/api/v1/advice/history",
            get(advice::handlers::handle_advice_history),
        )
        .route("/api/v1/purchases", get(advice::handlers::handle_list_purchases))
        .route(
            "/functions/v1/financial-ai-advisor",
            post(advice::handlers::handle_relay),
        )
        // Simulators & insights
        .route(
            "/api/v1/simulate/debt-payoff",
            post(calculators::handlers::handle_debt_payoff),
        )
        .route(
            "/api/v1/simulate/goal",
            post(calculators::handlers::handle_goal_simulation),
        )
        .route(
            "/api/v1/simulate/compound",
            post(calculators::handlers::handle_compound),
        )
        .route(
            "/api/v1/simulate/subscription",
            post(calculators::handlers::handle_subscription),
        )
        .route(
            "/api/v1/simulate/scenarios",
            post(calculators::handlers::handle_scenarios),
        )
        .route("/api/v1/insights", get(calculators::handlers::handle_insights))
        // Change feed
        .route("/api/v1/events", get(events::handlers::handle_events))
        .with_state(state)
}
