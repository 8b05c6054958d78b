//! Hosted advisor function ("relay") wire format.
//!
//! Request: `{message, type, userId, context?, history?}`.
//! Reply: `{response}` on success, `{error}` otherwise.
//!
//! `RelayAdvisor` is the client side. The server side is
//! `advice::handlers::handle_relay`, which answers with the grounded advisor.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advice::models::{AdviceRequest, AdviceType, ChatTurn, PurchaseContext, ProviderKind};
use crate::advice::providers::AdviceProvider;
use crate::advice::AdviceError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayContext<'a> {
    item_name: &'a str,
    item_price: f64,
}

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    message: &'a str,
    #[serde(rename = "type")]
    advice_type: &'a str,
    #[serde(rename = "userId")]
    user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<RelayContext<'a>>,
    #[serde(skip_serializing_if = "no_history")]
    history: &'a [ChatTurn],
}

fn no_history(history: &&[ChatTurn]) -> bool {
    history.is_empty()
}

/// Inbound relay body as posted by a remote client.
#[derive(Debug, Deserialize)]
pub struct RelayInbound {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub advice_type: AdviceType,
    #[serde(default, rename = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub context: Option<PurchaseContext>,
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
}

impl RelayInbound {
    /// Fails with the relay error text when the user id or message is missing.
    pub fn into_request(self) -> Result<AdviceRequest, &'static str> {
        let user_id = self.user_id.ok_or("User ID is required")?;
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .ok_or("Message is required")?;
        Ok(AdviceRequest {
            user_id,
            message,
            advice_type: self.advice_type,
            context: self.context,
            history: self.history.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RelayReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayReply {
    pub fn response(text: String) -> Self {
        Self {
            response: Some(text),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response: None,
            error: Some(message.into()),
        }
    }
}

/// Primary provider when `ADVISOR_RELAY_URL` is configured.
pub struct RelayAdvisor {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl RelayAdvisor {
    pub fn new(url: String, api_key: Option<String>) -> Result<Self, AdviceError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()?,
            url,
            api_key,
        })
    }
}

#[async_trait]
impl AdviceProvider for RelayAdvisor {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Relay
    }

    async fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        let body = RelayRequest {
            message: &request.message,
            advice_type: request.advice_type.as_str(),
            user_id: request.user_id,
            context: request.context.as_ref().map(|c| RelayContext {
                item_name: &c.item_name,
                item_price: c.item_price,
            }),
            history: &request.history,
        };

        let mut call = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await?;
        let status = response.status();
        let text = response.text().await?;
        parse_relay_reply(status.as_u16(), &text)
    }
}

/// Interprets a relay reply. Any non-2xx status, `{error}`, or missing/blank
/// `response` is a failure.
pub fn parse_relay_reply(status: u16, body: &str) -> Result<String, AdviceError> {
    let reply: RelayReply = match serde_json::from_str(body) {
        Ok(reply) => reply,
        Err(e) if (200..300).contains(&status) => {
            return Err(AdviceError::Relay(format!("malformed reply: {e}")))
        }
        Err(_) => return Err(AdviceError::Relay(format!("status {status}: {body}"))),
    };

    if let Some(error) = reply.error {
        return Err(AdviceError::Relay(format!("status {status}: {error}")));
    }
    if !(200..300).contains(&status) {
        return Err(AdviceError::Relay(format!("status {status}")));
    }

    reply
        .response
        .filter(|r| !r.trim().is_empty())
        .ok_or(AdviceError::Empty)
}
