use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One prior message, replayed to the model for conversational grounding only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// What kind of advice the caller is asking for. Unknown tags fall back to `Chat`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdviceType {
    Explain,
    PurchaseAdvice,
    BudgetHelp,
    CreditImprovement,
    SubscriptionOpt,
    UtilityOpt,
    NextSteps,
    /// Catch-all; must stay the last variant.
    #[default]
    #[serde(other)]
    Chat,
}

impl AdviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceType::Chat => "chat",
            AdviceType::Explain => "explain",
            AdviceType::PurchaseAdvice => "purchase_advice",
            AdviceType::BudgetHelp => "budget_help",
            AdviceType::CreditImprovement => "credit_improvement",
            AdviceType::SubscriptionOpt => "subscription_opt",
            AdviceType::UtilityOpt => "utility_opt",
            AdviceType::NextSteps => "next_steps",
        }
    }
}

/// Item under consideration for `purchase_advice`. Accepts the relay's camelCase keys too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseContext {
    #[serde(alias = "itemName")]
    pub item_name: String,
    #[serde(alias = "itemPrice")]
    pub item_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub user_id: Uuid,
    pub message: String,
    #[serde(default, rename = "type")]
    pub advice_type: AdviceType,
    #[serde(default)]
    pub context: Option<PurchaseContext>,
    /// Prior turns, oldest first. Empty means "load recent conversation".
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl AdviceRequest {
    /// Item context only counts for purchase advice with a usable price.
    pub fn purchase_context(&self) -> Option<&PurchaseContext> {
        if self.advice_type != AdviceType::PurchaseAdvice {
            return None;
        }
        self.context
            .as_ref()
            .filter(|c| c.item_price.is_finite() && c.item_price > 0.0)
    }
}

/// Which advisor answered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Relay,
    Grounded,
    Direct,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Relay => "relay",
            ProviderKind::Grounded => "grounded",
            ProviderKind::Direct => "direct",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_advice_type_falls_back_to_chat() {
        let req: AdviceRequest = serde_json::from_value(json!({
            "user_id": Uuid::new_v4(),
            "message": "hi",
            "type": "retirement_planning"
        }))
        .unwrap();
        assert_eq!(req.advice_type, AdviceType::Chat);
    }

    #[test]
    fn test_known_advice_types_keep_their_tag() {
        let parsed: AdviceType = serde_json::from_value(json!("purchase_advice")).unwrap();
        assert_eq!(parsed, AdviceType::PurchaseAdvice);
        assert_eq!(serde_json::to_value(AdviceType::Chat).unwrap(), json!("chat"));
        assert_eq!(
            serde_json::to_value(AdviceType::NextSteps).unwrap(),
            json!(AdviceType::NextSteps.as_str())
        );
    }

    #[test]
    fn test_missing_type_defaults_to_chat() {
        let req: AdviceRequest = serde_json::from_value(json!({
            "user_id": Uuid::new_v4(),
            "message": "hi"
        }))
        .unwrap();
        assert_eq!(req.advice_type, AdviceType::Chat);
        assert!(req.history.is_empty());
    }

    #[test]
    fn test_purchase_context_accepts_camel_case() {
        let ctx: PurchaseContext =
            serde_json::from_value(json!({"itemName": "Laptop", "itemPrice": 65000})).unwrap();
        assert_eq!(ctx.item_name, "Laptop");
        assert_eq!(ctx.item_price, 65000.0);
    }

    #[test]
    fn test_purchase_context_ignored_for_other_types() {
        let req = AdviceRequest {
            user_id: Uuid::new_v4(),
            message: "budget please".into(),
            advice_type: AdviceType::BudgetHelp,
            context: Some(PurchaseContext {
                item_name: "Phone".into(),
                item_price: 20000.0,
            }),
            history: vec![],
        };
        assert!(req.purchase_context().is_none());
    }

    #[test]
    fn test_purchase_context_requires_positive_price() {
        let req = AdviceRequest {
            user_id: Uuid::new_v4(),
            message: "can I buy it?".into(),
            advice_type: AdviceType::PurchaseAdvice,
            context: Some(PurchaseContext {
                item_name: "Phone".into(),
                item_price: 0.0,
            }),
            history: vec![],
        };
        assert!(req.purchase_context().is_none());
    }
}
