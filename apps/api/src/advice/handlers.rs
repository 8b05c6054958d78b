use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::advice::classify::Recommendation;
use crate::advice::models::{AdviceRequest, ChatTurn, ProviderKind};
use crate::advice::providers::{tail, AdviceProvider};
use crate::advice::relay::{RelayInbound, RelayReply};
use crate::advice::service::AdviceOutcome;
use crate::advice::store::{self, NewConversation};
use crate::errors::AppError;
use crate::events::{ChangeEvent, Table};
use crate::models::advice::{ConversationRow, PurchaseDecisionRow};
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::validation::require_text;

/// Conversation records replayed when the caller sends no history.
const RECENT_CONVERSATIONS: i64 = 5;
/// Caller-supplied history is cut to this many turns.
const MAX_HISTORY_TURNS: usize = 10;
const HISTORY_PAGE: i64 = 20;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub response: String,
    pub provider: ProviderKind,
    pub used_fallback: bool,
    /// Present for purchase advice that carried item context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    /// `None` when the conversation could not be recorded.
    pub conversation_id: Option<Uuid>,
}

pub fn cap_history(history: Vec<ChatTurn>) -> Vec<ChatTurn> {
    tail(&history, MAX_HISTORY_TURNS).to_vec()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/advice
///
/// Primary advisor, then one fallback hop. On success the exchange is recorded
/// and purchase advice is classified into approve / wait / reject.
pub async fn handle_advice(
    State(state): State<AppState>,
    Json(mut req): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, AppError> {
    require_text("message", &req.message)?;

    req.history = if req.history.is_empty() {
        // A failed load degrades to no history; the providers still run.
        match store::recent_conversations(&state.db, req.user_id, RECENT_CONVERSATIONS).await {
            Ok(records) => store::history_from_records(&records),
            Err(e) => {
                warn!("Could not load history for user {}: {e}", req.user_id);
                Vec::new()
            }
        }
    } else {
        cap_history(std::mem::take(&mut req.history))
    };

    info!(
        "Advice request from user {}: type={}, history={} turns",
        req.user_id,
        req.advice_type.as_str(),
        req.history.len()
    );

    let outcome = state.advisor.ask(&req).await?;
    let conversation_id = record_exchange(&state, &req, &outcome).await;
    let recommendation = record_purchase(&state, &req, &outcome.text).await;

    Ok(Json(AdviceResponse {
        response: outcome.text,
        provider: outcome.provider,
        used_fallback: outcome.used_fallback,
        recommendation,
        conversation_id,
    }))
}

/// Best effort: a failed write is logged and the answer still goes out.
async fn record_exchange(
    state: &AppState,
    req: &AdviceRequest,
    outcome: &AdviceOutcome,
) -> Option<Uuid> {
    let context_data = req
        .context
        .as_ref()
        .and_then(|c| serde_json::to_value(c).ok());

    let recorded = store::record_conversation(
        &state.db,
        NewConversation {
            user_id: req.user_id,
            conversation_type: req.advice_type.as_str(),
            user_message: &req.message,
            ai_response: &outcome.text,
            context_data: context_data.as_ref(),
            provider: outcome.provider.as_str(),
        },
    )
    .await;

    match recorded {
        Ok(row) => {
            state
                .events
                .publish(ChangeEvent::inserted(Table::AiConversations, req.user_id, row.id));
            Some(row.id)
        }
        Err(e) => {
            warn!("Failed to record conversation for user {}: {e}", req.user_id);
            None
        }
    }
}

/// Classifies purchase advice and logs the decision. The recommendation is
/// returned even when the write fails.
async fn record_purchase(state: &AppState, req: &AdviceRequest, text: &str) -> Option<Recommendation> {
    let item = req.purchase_context()?;
    let recommendation = state.classifier.classify(text);

    match store::record_purchase_decision(
        &state.db,
        req.user_id,
        &item.item_name,
        item.item_price,
        recommendation,
        text,
    )
    .await
    {
        Ok(row) => {
            info!(
                "Purchase '{}' classified as {} for user {}",
                item.item_name,
                recommendation.as_str(),
                req.user_id
            );
            state
                .events
                .publish(ChangeEvent::inserted(Table::PurchaseDecisions, req.user_id, row.id));
        }
        Err(e) => warn!("Failed to record purchase decision for user {}: {e}", req.user_id),
    }

    Some(recommendation)
}

/// GET /api/v1/advice/history
///
/// Last 20 conversation records, oldest first.
pub async fn handle_advice_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ConversationRow>>, AppError> {
    let rows = store::recent_conversations(&state.db, params.user_id, HISTORY_PAGE).await?;
    Ok(Json(rows))
}

/// GET /api/v1/purchases
pub async fn handle_list_purchases(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PurchaseDecisionRow>>, AppError> {
    let rows = store::list_purchase_decisions(&state.db, params.user_id).await?;
    Ok(Json(rows))
}

/// POST /functions/v1/financial-ai-advisor
///
/// Relay wire endpoint answered by the grounded advisor, so another deployment
/// can use this one as its primary. Nothing is recorded here; the calling side
/// records the exchange.
pub async fn handle_relay(
    State(state): State<AppState>,
    Json(body): Json<RelayInbound>,
) -> (StatusCode, Json<RelayReply>) {
    let request = match body.into_request() {
        Ok(request) => request,
        Err(reason) => return (StatusCode::BAD_REQUEST, Json(RelayReply::error(reason))),
    };

    match state.grounded.advise(&request).await {
        Ok(text) if !text.trim().is_empty() => (StatusCode::OK, Json(RelayReply::response(text))),
        Ok(_) => {
            error!("Relay advice for user {} came back empty", request.user_id);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayReply::error("Provider returned no advice")),
            )
        }
        Err(e) => {
            error!("Relay advice failed for user {}: {e}", request.user_id);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayReply::error(e.to_string())),
            )
        }
    }
}
