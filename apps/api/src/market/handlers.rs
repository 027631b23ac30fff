//! HTTP handler for the market overview endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::market::benchmarks::{benchmark_salary, SalaryBenchmark};
use crate::market::commentary::MarketCommentary;
use crate::market::refresh::{cache_suffix, rebuild_market_record, MarketRecord};
use crate::market::snapshot::MarketSnapshot;
use crate::models::profile::ExperienceLevel;
use crate::state::AppState;
use crate::store::RecordClass;

fn default_domain() -> String {
    "software engineer".to_string()
}

fn default_market_location() -> String {
    "united states".to_string()
}

#[derive(Debug, Deserialize)]
pub struct MarketOverviewQuery {
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_market_location")]
    pub location: String,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub current_salary: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MarketOverviewResponse {
    pub snapshot: MarketSnapshot,
    pub commentary: MarketCommentary,
    pub benchmark: SalaryBenchmark,
    pub from_cache: bool,
}

/// GET /api/v1/market/overview
///
/// Serves the cached market record when one is live, rebuilding it (one
/// commentary call) on a miss. The benchmark is always computed fresh since
/// it depends on the caller's salary.
pub async fn market_overview(
    State(state): State<AppState>,
    Query(query): Query<MarketOverviewQuery>,
) -> Result<Json<MarketOverviewResponse>, AppError> {
    let domain = normalized(&query.domain, "domain")?;
    let location = normalized(&query.location, "location")?;
    let level = query.experience_level;

    let suffix = cache_suffix(&domain, &location, level);
    let cached: Option<MarketRecord> = state.store.get(RecordClass::Market, &suffix).await?;
    let from_cache = cached.is_some();
    let record = match cached {
        Some(record) => record,
        None => rebuild_market_record(&state, &domain, &location, level).await?,
    };

    info!(
        "Market overview for {} in {} ({}), cache {}",
        domain,
        location,
        level.as_str(),
        if from_cache { "hit" } else { "miss" }
    );

    let benchmark = benchmark_salary(&record.snapshot, query.current_salary);

    Ok(Json(MarketOverviewResponse {
        snapshot: record.snapshot,
        commentary: record.commentary,
        benchmark,
        from_cache,
    }))
}

/// Lowercases and trims a query field, rejecting blank values.
fn normalized(value: &str, field: &str) -> Result<String, AppError> {
    let cleaned = value.trim().to_lowercase();
    if cleaned.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query: MarketOverviewQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.domain, "software engineer");
        assert_eq!(query.location, "united states");
        assert_eq!(query.experience_level, ExperienceLevel::Mid);
        assert_eq!(query.current_salary, None);
    }

    #[test]
    fn test_query_accepts_full_parameters() {
        let query: MarketOverviewQuery = serde_json::from_str(
            r#"{"domain": "Data Scientist", "location": "Remote", "experience_level": "Senior", "current_salary": 140000}"#,
        )
        .unwrap();
        assert_eq!(query.domain, "Data Scientist");
        assert_eq!(query.experience_level, ExperienceLevel::Senior);
        assert_eq!(query.current_salary, Some(140_000));
    }

    #[test]
    fn test_normalized_lowercases_and_trims() {
        assert_eq!(
            normalized(" San Francisco ", "location").unwrap(),
            "san francisco"
        );
        assert!(normalized("   ", "domain").is_err());
    }
}
