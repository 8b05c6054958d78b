use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::advice::classify::Recommendation;
use crate::advice::models::{ChatRole, ChatTurn};
use crate::models::advice::{ConversationRow, PurchaseDecisionRow};

pub struct NewConversation<'a> {
    pub user_id: Uuid,
    pub conversation_type: &'a str,
    pub user_message: &'a str,
    pub ai_response: &'a str,
    pub context_data: Option<&'a Value>,
    pub provider: &'a str,
}

pub async fn record_conversation(
    pool: &PgPool,
    conversation: NewConversation<'_>,
) -> Result<ConversationRow, sqlx::Error> {
    sqlx::query_as::<_, ConversationRow>(
        r#"
        INSERT INTO ai_conversations
            (user_id, conversation_type, user_message, ai_response, context_data, provider)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(conversation.user_id)
    .bind(conversation.conversation_type)
    .bind(conversation.user_message)
    .bind(conversation.ai_response)
    .bind(conversation.context_data)
    .bind(conversation.provider)
    .fetch_one(pool)
    .await
}

pub async fn record_purchase_decision(
    pool: &PgPool,
    user_id: Uuid,
    item_name: &str,
    item_price: f64,
    recommendation: Recommendation,
    reasoning: &str,
) -> Result<PurchaseDecisionRow, sqlx::Error> {
    sqlx::query_as::<_, PurchaseDecisionRow>(
        r#"
        INSERT INTO purchase_decisions (user_id, item_name, item_price, ai_recommendation, reasoning)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(item_name)
    .bind(item_price)
    .bind(recommendation.as_str())
    .bind(reasoning)
    .fetch_one(pool)
    .await
}

/// The user's last `limit` conversation records, oldest first.
pub async fn recent_conversations(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<ConversationRow>, sqlx::Error> {
    let mut rows = sqlx::query_as::<_, ConversationRow>(
        r#"
        SELECT * FROM ai_conversations
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.reverse();
    Ok(rows)
}

pub async fn list_purchase_decisions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PurchaseDecisionRow>, sqlx::Error> {
    sqlx::query_as::<_, PurchaseDecisionRow>(
        "SELECT * FROM purchase_decisions WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Expands each record into a user turn followed by an assistant turn.
pub fn history_from_records(records: &[ConversationRow]) -> Vec<ChatTurn> {
    records
        .iter()
        .flat_map(|r| {
            [
                ChatTurn::new(ChatRole::User, r.user_message.as_str()),
                ChatTurn::new(ChatRole::Assistant, r.ai_response.as_str()),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(question: &str, answer: &str) -> ConversationRow {
        ConversationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            conversation_type: "chat".into(),
            user_message: question.into(),
            ai_response: answer.into(),
            context_data: None,
            provider: "grounded".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_history_alternates_user_and_assistant() {
        let turns = history_from_records(&[
            record("What is an SIP?", "A systematic investment plan."),
            record("How much?", "Start with ₹2,000."),
        ]);
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, ChatRole::User);
        assert_eq!(turns[1].role, ChatRole::Assistant);
        assert_eq!(turns[2].content, "How much?");
        assert_eq!(turns[3].content, "Start with ₹2,000.");
    }

    #[test]
    fn test_history_from_no_records_is_empty() {
        assert!(history_from_records(&[]).is_empty());
    }
}
