use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub conversation_type: String,
    pub user_message: String,
    pub ai_response: String,
    pub context_data: Option<Value>,
    /// Which advisor produced `ai_response`.
    pub provider: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PurchaseDecisionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_name: String,
    pub item_price: f64,
    pub ai_recommendation: String,
    pub reasoning: String,
    pub created_at: DateTime<Utc>,
}
