//! HTTP handlers for the job search endpoints.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::MODEL;
use crate::matching::analyzer::{score_listings, ScoredListing};
use crate::matching::boards::{search_all_boards, JOB_BOARDS};
use crate::matching::insights::{average_match_score, build_search_insights, SearchInsights};
use crate::models::profile::{ExperienceLevel, GraduationOutlook, UserProfile};
use crate::state::AppState;
use crate::store::{history_key, notifications_key, RecordClass, HISTORY_CAP, NOTIFICATIONS_CAP};

/// Matches returned in the response when the client does not ask otherwise.
const DEFAULT_MATCH_LIMIT: usize = 15;
const MAX_MATCH_LIMIT: usize = 50;
/// Matches embedded in the stored search record.
const STORED_MATCH_CAP: usize = 10;
/// Minimum best-match score that warrants a notification entry.
const NOTIFY_THRESHOLD: u8 = 70;

#[derive(Debug, Deserialize)]
pub struct JobSearchRequest {
    pub profile: UserProfile,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub search_id: String,
    pub generated_at: DateTime<Utc>,
    pub matched_jobs: Vec<ScoredListing>,
    pub total_found: usize,
    pub insights: Option<SearchInsights>,
    pub timeline: Option<GraduationOutlook>,
    pub metadata: SearchMetadata,
}

#[derive(Debug, Serialize)]
pub struct SearchMetadata {
    pub boards_searched: Vec<String>,
    pub next_search_suggested: DateTime<Utc>,
    /// Model behind the analysis, absent when AI matching is disabled.
    pub ai_model: Option<&'static str>,
    /// Set when at least one listing fell back to heuristic analysis.
    pub analysis_degraded: bool,
}

/// Persisted form of a completed search, served by the lookup endpoint until
/// its retention window lapses.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRecord {
    pub search_id: String,
    pub user_id: String,
    pub generated_at: DateTime<Utc>,
    pub search_params: SearchParams,
    pub results_summary: ResultsSummary,
    pub top_matches: Vec<ScoredListing>,
    pub insights: Option<SearchInsights>,
}

/// Snapshot of the profile fields the search keyed off.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchParams {
    pub target_role: String,
    pub location: String,
    pub experience_level: ExperienceLevel,
    pub salary_expectation: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub total_jobs_found: usize,
    pub top_match_score: u8,
    pub average_match_score: f64,
    pub sources_searched: Vec<String>,
    pub salary_floor: u32,
    pub salary_ceiling: u32,
}

/// Compact per-search entry kept in the user's history list.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchSummary {
    pub search_id: String,
    pub generated_at: DateTime<Utc>,
    pub target_role: String,
    pub location: String,
    pub total_found: usize,
    pub top_match_score: u8,
    pub average_match_score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchNotification {
    pub user_id: String,
    pub notification_type: String,
    pub sent_at: DateTime<Utc>,
    pub search_id: String,
    pub total_jobs_found: usize,
    pub top_matches: Vec<NotifiedMatch>,
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotifiedMatch {
    pub title: String,
    pub company: String,
    pub match_score: u8,
    pub salary_range: String,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub user_id: String,
    pub searches: Vec<SearchSummary>,
}

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub user_id: String,
    pub notifications: Vec<MatchNotification>,
}

/// POST /api/v1/jobs/search
///
/// Runs the full pipeline: synthesize listings from every board, analyze and
/// rank them, derive insights, persist the search record, and update the
/// user's history and notification lists.
pub async fn search_jobs(
    State(state): State<AppState>,
    Json(request): Json<JobSearchRequest>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let profile = request.profile;
    if profile.user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id must not be empty".to_string()));
    }
    let limit = match request.limit {
        Some(limit) if limit == 0 || limit > MAX_MATCH_LIMIT => {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_MATCH_LIMIT}"
            )));
        }
        Some(limit) => limit,
        None => DEFAULT_MATCH_LIMIT,
    };

    let now = Utc::now();
    let listings = search_all_boards(&profile, now);
    let total_found = listings.len();
    let scored = score_listings(state.matcher.as_ref(), listings, &profile, now).await;

    info!(
        "Job search for user {} matched {} listings (top score {})",
        profile.user_id,
        scored.len(),
        scored.first().map(|s| s.analysis.match_score).unwrap_or(0)
    );

    let insights = build_search_insights(&scored, &profile);
    let timeline = profile.graduation_outlook(now.date_naive());
    let search_id = Uuid::new_v4().to_string();

    let record = build_search_record(&search_id, &profile, &scored, total_found, now, &insights);
    state.store.put(RecordClass::Search, &search_id, &record).await?;

    // History and notifications are auxiliary: a failed push degrades the
    // lists but never the search itself.
    let summary = SearchSummary {
        search_id: search_id.clone(),
        generated_at: now,
        target_role: profile.target_role.clone(),
        location: profile.location.clone(),
        total_found,
        top_match_score: record.results_summary.top_match_score,
        average_match_score: record.results_summary.average_match_score,
    };
    if let Err(err) = state
        .store
        .push_capped(&history_key(&profile.user_id), &summary, HISTORY_CAP)
        .await
    {
        warn!("Failed to record search history for user {}: {err}", profile.user_id);
    }

    if record.results_summary.top_match_score >= NOTIFY_THRESHOLD {
        let notification = build_notification(&search_id, &profile.user_id, &scored, now);
        if let Err(err) = state
            .store
            .push_capped(
                &notifications_key(&profile.user_id),
                &notification,
                NOTIFICATIONS_CAP,
            )
            .await
        {
            warn!("Failed to store notification for user {}: {err}", profile.user_id);
        }
    }

    let analysis_degraded = scored.iter().any(|s| s.analysis.degraded);
    let response = JobSearchResponse {
        search_id,
        generated_at: now,
        matched_jobs: scored.into_iter().take(limit).collect(),
        total_found,
        insights,
        timeline,
        metadata: SearchMetadata {
            boards_searched: JOB_BOARDS.iter().map(|b| b.key.to_string()).collect(),
            next_search_suggested: now + Duration::hours(24),
            ai_model: state.config.enable_llm_matching.then_some(MODEL),
            analysis_degraded,
        },
    };

    Ok(Json(response))
}

fn build_search_record(
    search_id: &str,
    profile: &UserProfile,
    scored: &[ScoredListing],
    total_found: usize,
    now: DateTime<Utc>,
    insights: &Option<SearchInsights>,
) -> SearchRecord {
    let mut sources: Vec<String> = Vec::new();
    for entry in scored {
        if !sources.contains(&entry.job.source) {
            sources.push(entry.job.source.clone());
        }
    }

    SearchRecord {
        search_id: search_id.to_string(),
        user_id: profile.user_id.clone(),
        generated_at: now,
        search_params: SearchParams {
            target_role: profile.target_role.clone(),
            location: profile.location.clone(),
            experience_level: profile.experience_level,
            salary_expectation: profile.salary_expectation,
        },
        results_summary: ResultsSummary {
            total_jobs_found: total_found,
            top_match_score: scored.first().map(|s| s.analysis.match_score).unwrap_or(0),
            average_match_score: average_match_score(scored),
            sources_searched: sources,
            salary_floor: scored.iter().map(|s| s.job.salary_min).min().unwrap_or(0),
            salary_ceiling: scored.iter().map(|s| s.job.salary_max).max().unwrap_or(0),
        },
        top_matches: scored.iter().take(STORED_MATCH_CAP).cloned().collect(),
        insights: insights.clone(),
    }
}

fn build_notification(
    search_id: &str,
    user_id: &str,
    scored: &[ScoredListing],
    now: DateTime<Utc>,
) -> MatchNotification {
    MatchNotification {
        user_id: user_id.to_string(),
        notification_type: "job_search_complete".to_string(),
        sent_at: now,
        search_id: search_id.to_string(),
        total_jobs_found: scored.len(),
        top_matches: scored
            .iter()
            .take(3)
            .map(|s| NotifiedMatch {
                title: s.job.title.clone(),
                company: s.job.company.clone(),
                match_score: s.analysis.match_score,
                salary_range: s.job.salary_range_display(),
                location: s.job.location.clone(),
            })
            .collect(),
        summary: format!(
            "Found {} jobs with average match score of {:.1}%",
            scored.len(),
            average_match_score(scored)
        ),
    }
}

/// GET /api/v1/jobs/search/:search_id
pub async fn get_search(
    State(state): State<AppState>,
    Path(search_id): Path<String>,
) -> Result<Json<SearchRecord>, AppError> {
    let record: Option<SearchRecord> =
        state.store.get(RecordClass::Search, &search_id).await?;
    record
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("search {search_id} not found or expired")))
}

/// GET /api/v1/jobs/history/:user_id
pub async fn get_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let searches = state.store.list(&history_key(&user_id)).await?;
    Ok(Json(HistoryResponse { user_id, searches }))
}

/// GET /api/v1/jobs/notifications/:user_id
pub async fn get_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<NotificationsResponse>, AppError> {
    let notifications = state.store.list(&notifications_key(&user_id)).await?;
    Ok(Json(NotificationsResponse { user_id, notifications }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::analyzer::{HeuristicMatcher, JobMatcher};

    fn make_profile() -> UserProfile {
        serde_json::from_str(
            r#"{
                "user_id": "u-1",
                "target_role": "Software Engineer",
                "experience_level": "Entry",
                "skills": ["Python", "AWS"],
                "salary_expectation": 80000,
                "location": "Austin, TX"
            }"#,
        )
        .expect("profile should deserialize")
    }

    async fn scored_batch() -> Vec<ScoredListing> {
        let profile = make_profile();
        let now = Utc::now();
        let listings = search_all_boards(&profile, now);
        score_listings(&HeuristicMatcher, listings, &profile, now).await
    }

    #[tokio::test]
    async fn test_search_record_summarizes_batch() {
        let profile = make_profile();
        let scored = scored_batch().await;
        let total = scored.len();
        let insights = build_search_insights(&scored, &profile);
        let record = build_search_record("s-1", &profile, &scored, total, Utc::now(), &insights);

        assert_eq!(record.results_summary.total_jobs_found, total);
        assert_eq!(record.top_matches.len(), STORED_MATCH_CAP);
        assert_eq!(
            record.results_summary.top_match_score,
            scored[0].analysis.match_score
        );
        assert!(record.results_summary.salary_floor >= 50_000);
        assert!(record.results_summary.salary_ceiling <= 200_000);
        assert!(record.results_summary.sources_searched.contains(&"indeed".to_string()));
        assert!(record.insights.is_some());
    }

    #[tokio::test]
    async fn test_notification_carries_top_three() {
        let scored = scored_batch().await;
        let notification = build_notification("s-1", "u-1", &scored, Utc::now());

        assert_eq!(notification.top_matches.len(), 3);
        assert_eq!(notification.notification_type, "job_search_complete");
        assert_eq!(notification.top_matches[0].match_score, scored[0].analysis.match_score);
        assert!(notification.top_matches[0].salary_range.starts_with('$'));
        assert!(notification.summary.starts_with("Found"));
    }

    #[tokio::test]
    async fn test_request_limit_bounds() {
        // Deserialization side of validation: absent limit defaults later.
        let request: JobSearchRequest =
            serde_json::from_str(r#"{"profile": {"user_id": "u-1"}}"#).unwrap();
        assert!(request.limit.is_none());

        let request: JobSearchRequest =
            serde_json::from_str(r#"{"profile": {"user_id": "u-1"}, "limit": 5}"#).unwrap();
        assert_eq!(request.limit, Some(5));
    }

    #[tokio::test]
    async fn test_matcher_trait_object_is_usable() {
        let matcher: std::sync::Arc<dyn JobMatcher> = std::sync::Arc::new(HeuristicMatcher);
        let profile = make_profile();
        let listings = search_all_boards(&profile, Utc::now());
        let report = matcher.analyze(&listings[0], &profile).await;
        assert!(report.match_score <= 100);
    }
}
