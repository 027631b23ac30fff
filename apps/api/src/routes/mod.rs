pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::market;
use crate::matching;
use crate::profile;
use crate::resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/status", get(health::status_handler))
        // Job matching
        .route("/api/v1/jobs/search", post(matching::handlers::search_jobs))
        .route(
            "/api/v1/jobs/search/:search_id",
            get(matching::handlers::get_search),
        )
        .route(
            "/api/v1/jobs/history/:user_id",
            get(matching::handlers::get_history),
        )
        .route(
            "/api/v1/jobs/notifications/:user_id",
            get(matching::handlers::get_notifications),
        )
        // Resume services
        .route(
            "/api/v1/resume/analyze",
            post(resume::handlers::analyze_resume_text),
        )
        .route("/api/v1/resume/upload", post(resume::handlers::upload_resume))
        .route(
            "/api/v1/resume/optimize",
            post(resume::handlers::optimize_for_job),
        )
        // Market intelligence
        .route(
            "/api/v1/market/overview",
            get(market::handlers::market_overview),
        )
        // Profiles
        .route("/api/v1/profile", post(profile::handlers::upsert_profile))
        .route("/api/v1/profile/:user_id", get(profile::handlers::get_profile))
        .route(
            "/api/v1/profile/:user_id/outlook",
            get(profile::handlers::get_outlook),
        )
        .with_state(state)
}
