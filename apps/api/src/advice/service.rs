//! Primary provider, then one fallback hop, then a single failure.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::advice::models::{AdviceRequest, ProviderKind};
use crate::advice::providers::AdviceProvider;
use crate::advice::AdviceError;

#[derive(Debug, Clone, Serialize)]
pub struct AdviceOutcome {
    pub text: String,
    pub provider: ProviderKind,
    pub used_fallback: bool,
}

pub struct AdviceService {
    primary: Arc<dyn AdviceProvider>,
    fallback: Arc<dyn AdviceProvider>,
}

impl AdviceService {
    pub fn new(primary: Arc<dyn AdviceProvider>, fallback: Arc<dyn AdviceProvider>) -> Self {
        Self { primary, fallback }
    }

    pub fn primary_kind(&self) -> ProviderKind {
        self.primary.kind()
    }

    /// Asks the primary provider; on error or blank text asks the fallback exactly once.
    /// No retries, no backoff, no caching.
    pub async fn ask(&self, request: &AdviceRequest) -> Result<AdviceOutcome, AdviceError> {
        let primary = self.primary.kind();
        match self.primary.advise(request).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    "Advice for user {} answered by {}",
                    request.user_id,
                    primary.as_str()
                );
                return Ok(AdviceOutcome {
                    text,
                    provider: primary,
                    used_fallback: false,
                });
            }
            Ok(_) => warn!(
                "Primary advisor {} returned empty advice for user {}, falling back",
                primary.as_str(),
                request.user_id
            ),
            Err(e) => warn!(
                "Primary advisor {} failed for user {}: {e}, falling back",
                primary.as_str(),
                request.user_id
            ),
        }

        let fallback = self.fallback.kind();
        match self.fallback.advise(request).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    "Advice for user {} answered by fallback {}",
                    request.user_id,
                    fallback.as_str()
                );
                Ok(AdviceOutcome {
                    text,
                    provider: fallback,
                    used_fallback: true,
                })
            }
            Ok(_) => {
                error!(
                    "Fallback advisor {} returned empty advice for user {}",
                    fallback.as_str(),
                    request.user_id
                );
                Err(AdviceError::Unavailable)
            }
            Err(AdviceError::MissingConfig(msg)) => {
                error!(
                    "Fallback advisor {} not configured: {msg}",
                    fallback.as_str()
                );
                Err(AdviceError::MissingConfig(msg))
            }
            Err(e) => {
                error!(
                    "Fallback advisor {} failed for user {}: {e}",
                    fallback.as_str(),
                    request.user_id
                );
                Err(AdviceError::Unavailable)
            }
        }
    }
}
