//! Pluggable sources of advice text.
//!
//! `AdviceService` holds an `Arc<dyn AdviceProvider>` for the primary and one
//! for the fallback, chosen at startup from config.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::advice::grounding::{
    load_snapshot, render_fallback_prompt, render_system_prompt, render_user_prompt,
};
use crate::advice::models::{AdviceRequest, ChatTurn, ProviderKind};
use crate::advice::AdviceError;
use crate::llm_client::prompts::FALLBACK_SYSTEM;
use crate::llm_client::LlmClient;

/// Turns of history the grounded advisor replays to the model.
pub const GROUNDED_HISTORY_TURNS: usize = 6;

/// Implement this to add an advice backend without touching the service or handlers.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError>;
}

/// Last `n` turns, oldest first.
pub fn tail(history: &[ChatTurn], n: usize) -> &[ChatTurn] {
    &history[history.len().saturating_sub(n)..]
}

// ────────────────────────────────────────────────────────────────────────────
// GroundedAdvisor: profile-aware, in-process
// ────────────────────────────────────────────────────────────────────────────

/// Loads the user's profile, goals, debts and budget and grounds the prompt in them.
pub struct GroundedAdvisor {
    db: PgPool,
    llm: LlmClient,
}

impl GroundedAdvisor {
    pub fn new(db: PgPool, llm: LlmClient) -> Self {
        Self { db, llm }
    }
}

#[async_trait]
impl AdviceProvider for GroundedAdvisor {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Grounded
    }

    async fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        if !self.llm.has_api_key() {
            return Err(crate::llm_client::LlmError::MissingApiKey.into());
        }

        let snapshot = load_snapshot(&self.db, request.user_id).await?;
        let system = render_system_prompt(&snapshot);
        let prompt = render_user_prompt(request, &snapshot);
        debug!(
            "Grounded advice for user {}: type={}, goals={}, debts={}, budget={}",
            request.user_id,
            request.advice_type.as_str(),
            snapshot.goals.len(),
            snapshot.debts.len(),
            snapshot.budget.len()
        );

        let history = tail(&request.history, GROUNDED_HISTORY_TURNS);
        Ok(self.llm.chat(&system, history, &prompt).await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DirectChatAdvisor: the fallback hop
// ────────────────────────────────────────────────────────────────────────────

/// Calls the chat-completion API directly with a generic system prompt.
pub struct DirectChatAdvisor {
    llm: LlmClient,
}

impl DirectChatAdvisor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AdviceProvider for DirectChatAdvisor {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Direct
    }

    async fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        let prompt = render_fallback_prompt(request);
        Ok(self
            .llm
            .chat(FALLBACK_SYSTEM, &request.history, &prompt)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::models::{AdviceType, ChatRole};
    use uuid::Uuid;

    #[test]
    fn test_tail_keeps_most_recent_turns() {
        let history: Vec<ChatTurn> = (0..10)
            .map(|i| ChatTurn::new(ChatRole::User, i.to_string()))
            .collect();
        let last = tail(&history, GROUNDED_HISTORY_TURNS);
        assert_eq!(last.len(), 6);
        assert_eq!(last[0].content, "4");
        assert_eq!(last[5].content, "9");
    }

    #[test]
    fn test_tail_shorter_than_window() {
        let history = vec![ChatTurn::new(ChatRole::User, "only")];
        assert_eq!(tail(&history, 6).len(), 1);
        assert!(tail(&[], 6).is_empty());
    }

    #[tokio::test]
    async fn test_direct_advisor_without_key_reports_missing_config() {
        let advisor = DirectChatAdvisor::new(LlmClient::new(None).unwrap());
        let request = AdviceRequest {
            user_id: Uuid::new_v4(),
            message: "hello".into(),
            advice_type: AdviceType::Chat,
            context: None,
            history: vec![],
        };
        match advisor.advise(&request).await {
            Err(AdviceError::MissingConfig(msg)) => {
                assert_eq!(msg, "OpenAI API key not configured")
            }
            other => panic!("expected MissingConfig, got {other:?}"),
        }
    }
}
