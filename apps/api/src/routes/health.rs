use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness probe. No downstream checks; answers as long as the process serves.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "compass-api"
    }))
}

/// GET /api/v1/status
/// Service document: enabled features and where to reach them.
pub async fn status_handler() -> Json<Value> {
    Json(json!({
        "service": "compass-api",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "features": {
            "job_search": "AI-assisted matching over synthesized listings",
            "resume_analysis": "Text and PDF analysis with ATS screening",
            "resume_optimization": "Job-targeted rewrite, cover letter, and application insights",
            "market_intelligence": "Cached demand, salary, and commentary snapshots",
            "profiles": "Durable profiles with graduation outlook"
        },
        "endpoints": {
            "search": "POST /api/v1/jobs/search",
            "search_record": "GET /api/v1/jobs/search/:search_id",
            "history": "GET /api/v1/jobs/history/:user_id",
            "notifications": "GET /api/v1/jobs/notifications/:user_id",
            "resume_analyze": "POST /api/v1/resume/analyze",
            "resume_upload": "POST /api/v1/resume/upload",
            "resume_optimize": "POST /api/v1/resume/optimize",
            "market_overview": "GET /api/v1/market/overview",
            "profile_upsert": "POST /api/v1/profile",
            "profile": "GET /api/v1/profile/:user_id",
            "profile_outlook": "GET /api/v1/profile/:user_id/outlook"
        }
    }))
}
