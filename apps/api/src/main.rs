mod config;
mod errors;
mod llm_client;
mod market;
mod matching;
mod models;
mod profile;
mod resume;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::analyzer::build_matcher;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::archive::DocumentArchive;
use crate::store::RecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Redis-backed record store
    let redis = redis::Client::open(config.redis_url.clone())?;
    let store = RecordStore::new(redis);
    info!("Record store initialized");

    // Initialize the S3 / MinIO document archive
    let s3 = build_s3_client(&config).await;
    let archive = DocumentArchive::new(s3, config.s3_bucket.clone());
    info!("Document archive initialized");

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Match analyzer (HeuristicMatcher by default, swap via ENABLE_LLM_MATCHING)
    let matcher = build_matcher(&config, &llm);

    let state = AppState {
        store,
        archive,
        llm,
        config: config.clone(),
        matcher,
    };

    // Background refresh keeps the core market snapshots warm
    tokio::spawn(market::refresh::run_refresh_loop(state.clone()));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "compass-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
