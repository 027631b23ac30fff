//! Cached market record maintenance: cache keys, rebuilds, and the
//! background loop that keeps core markets warm.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::market::commentary::{generate_commentary, MarketCommentary};
use crate::market::snapshot::{build_snapshot, MarketSnapshot};
use crate::models::profile::ExperienceLevel;
use crate::state::AppState;
use crate::store::RecordClass;

/// Domains the background refresh keeps warm.
pub const CORE_DOMAINS: &[&str] = &[
    "software engineer",
    "data scientist",
    "devops engineer",
    "product manager",
    "cybersecurity",
];

/// Market the refresh rebuilds; the default query shape.
const REFRESH_LOCATION: &str = "united states";

/// What the market cache stores: the snapshot and its commentary. Benchmarks
/// are computed per request because they depend on the caller's salary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRecord {
    pub snapshot: MarketSnapshot,
    pub commentary: MarketCommentary,
}

/// Cache key suffix for one market. Domain and location arrive lowercased.
pub fn cache_suffix(domain: &str, location: &str, level: ExperienceLevel) -> String {
    format!("{}:{}:{}", domain, location, level.as_str())
}

/// Builds a fresh record and writes it through to the store.
pub async fn rebuild_market_record(
    state: &AppState,
    domain: &str,
    location: &str,
    level: ExperienceLevel,
) -> Result<MarketRecord, AppError> {
    let snapshot = build_snapshot(domain, location, level, Utc::now());
    let commentary = generate_commentary(&state.llm, &snapshot).await;
    let record = MarketRecord {
        snapshot,
        commentary,
    };

    let suffix = cache_suffix(domain, location, level);
    state
        .store
        .put(RecordClass::Market, &suffix, &record)
        .await?;
    Ok(record)
}

/// Rebuilds the core markets on a fixed interval so interactive queries hit
/// a warm cache. The first tick fires immediately, warming the cache at
/// startup.
pub async fn run_refresh_loop(state: AppState) {
    let period = Duration::from_secs(state.config.market_refresh_hours * 3600);
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        info!("Refreshing {} core market snapshots", CORE_DOMAINS.len());
        for domain in CORE_DOMAINS {
            if let Err(err) =
                rebuild_market_record(&state, domain, REFRESH_LOCATION, ExperienceLevel::Mid).await
            {
                warn!("Market refresh for {} failed: {}", domain, err);
            }
        }
    }
}
