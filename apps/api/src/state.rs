use std::sync::Arc;

use sqlx::PgPool;

use crate::advice::classify::PurchaseClassifier;
use crate::advice::providers::GroundedAdvisor;
use crate::advice::service::AdviceService;
use crate::events::ChangeBus;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Primary advisor plus one fallback hop, chosen at startup.
    pub advisor: Arc<AdviceService>,
    /// Serves the relay endpoint directly, without the fallback hop.
    pub grounded: Arc<GroundedAdvisor>,
    /// Pluggable purchase classifier. Default: KeywordClassifier.
    pub classifier: Arc<dyn PurchaseClassifier>,
    pub events: ChangeBus,
}
