use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::analyzer::JobMatcher;
use crate::store::archive::DocumentArchive;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub archive: DocumentArchive,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable match analyzer. Default: HeuristicMatcher. Swap via ENABLE_LLM_MATCHING env.
    pub matcher: Arc<dyn JobMatcher>,
}
