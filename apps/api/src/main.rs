mod advice;
mod budget;
mod calculators;
mod checkin;
mod config;
mod db;
mod debts;
mod errors;
mod events;
mod goals;
mod llm_client;
mod models;
mod profile;
mod routes;
mod state;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advice::classify::KeywordClassifier;
use crate::advice::providers::{AdviceProvider, DirectChatAdvisor, GroundedAdvisor};
use crate::advice::relay::RelayAdvisor;
use crate::advice::service::AdviceService;
use crate::config::Config;
use crate::db::create_pool;
use crate::events::ChangeBus;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ledgerwise API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone())?;
    if llm.has_api_key() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("OPENAI_API_KEY not set; LLM-backed advice will report missing configuration");
    }

    // Advisors: relay primary when configured, grounded otherwise; direct chat is the fallback
    let grounded = Arc::new(GroundedAdvisor::new(db.clone(), llm.clone()));
    let primary: Arc<dyn AdviceProvider> = match &config.advisor_relay_url {
        Some(url) => Arc::new(RelayAdvisor::new(
            url.clone(),
            config.advisor_relay_key.clone(),
        )?),
        None => grounded.clone() as Arc<dyn AdviceProvider>,
    };
    let fallback: Arc<dyn AdviceProvider> = Arc::new(DirectChatAdvisor::new(llm));
    let advisor = Arc::new(AdviceService::new(primary, fallback));
    info!(
        "Advice providers: primary={}, fallback=direct",
        advisor.primary_kind().as_str()
    );

    // Build app state
    let state = AppState {
        db,
        advisor,
        grounded,
        classifier: Arc::new(KeywordClassifier),
        events: ChangeBus::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
