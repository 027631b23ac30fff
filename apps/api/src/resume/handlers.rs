//! HTTP handlers for the resume endpoints.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::resume::analysis::{analyze_resume, suggest_improvements, ImprovementPlan, ResumeAnalysis};
use crate::resume::ats::{screen_resume, AtsReport};
use crate::resume::extract::extract_text;
use crate::resume::optimizer::{
    generate_application_insights, generate_cover_letter, optimize_resume, ApplicationInsights,
    CoverLetter, OptimizedResume,
};
use crate::state::AppState;
use crate::store::RecordClass;

/// Largest resume text accepted for analysis, in characters.
const MAX_RESUME_CHARS: usize = 100_000;

#[derive(Debug, Deserialize)]
pub struct ResumeAnalyzeRequest {
    pub user_id: String,
    pub resume_text: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Analysis response, also the persisted record served by the 90-day
/// retention class.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResumeAnalysisReport {
    pub analysis_id: String,
    pub user_id: String,
    pub analysis_type: String,
    pub filename: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub analysis: ResumeAnalysis,
    pub ats_screen: AtsReport,
    pub improvement_plan: ImprovementPlan,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub profile: UserProfile,
    pub resume_text: String,
    pub job_description: String,
    pub job_title: String,
    pub company_name: String,
}

/// Optimization response, also the persisted record served by the 180-day
/// retention class.
#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub optimization_id: String,
    pub user_id: String,
    pub generated_at: DateTime<Utc>,
    pub job_title: String,
    pub company_name: String,
    pub optimized_resume: OptimizedResume,
    pub cover_letter: CoverLetter,
    /// Deterministic screen of the rewritten resume against the target job.
    pub ats_screen: AtsReport,
    pub application_insights: ApplicationInsights,
    /// Object-store key of the archived artifact, absent when archiving failed.
    pub archive_key: Option<String>,
}

/// POST /api/v1/resume/analyze
pub async fn analyze_resume_text(
    State(state): State<AppState>,
    Json(request): Json<ResumeAnalyzeRequest>,
) -> Result<Json<ResumeAnalysisReport>, AppError> {
    require_non_empty(&request.user_id, "user_id")?;
    let resume_text = validated_resume_text(&request.resume_text)?;

    let report = run_analysis(
        &state,
        request.user_id,
        resume_text,
        request.filename,
        "resume_text",
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/v1/resume/upload
///
/// Multipart form with a `user_id` field and a `file` field. The file is
/// extracted to text and run through the same pipeline as the text endpoint.
pub async fn upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeAnalysisReport>, AppError> {
    let mut user_id: Option<String> = None;
    let mut filename: Option<String> = None;
    let mut payload: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("user_id") => user_id = Some(field.text().await.map_err(bad_multipart)?),
            Some("file") => {
                filename = field.file_name().map(str::to_string);
                payload = Some(field.bytes().await.map_err(bad_multipart)?);
            }
            _ => {}
        }
    }

    let user_id = user_id.unwrap_or_default();
    require_non_empty(&user_id, "user_id")?;
    let payload = payload
        .ok_or_else(|| AppError::Validation("file field is required".to_string()))?;
    let filename = filename.unwrap_or_else(|| "resume.txt".to_string());

    let resume_text = validated_resume_text(&extract_text(&filename, &payload)?)?;

    let report = run_analysis(&state, user_id, resume_text, Some(filename), "resume_upload").await?;
    Ok(Json(report))
}

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::Validation(format!("invalid multipart payload: {err}"))
}

/// Shared analysis pipeline behind both the text and upload endpoints.
async fn run_analysis(
    state: &AppState,
    user_id: String,
    resume_text: String,
    filename: Option<String>,
    analysis_type: &str,
) -> Result<ResumeAnalysisReport, AppError> {
    let now = Utc::now();
    let analysis = analyze_resume(&state.llm, &resume_text).await;
    let improvement_plan = suggest_improvements(&state.llm, &resume_text, &analysis).await;
    let ats_screen = screen_resume(&resume_text, None);

    info!(
        "Resume analysis for user {}: overall {}, ats {}, {} words",
        user_id,
        analysis.overall_score,
        ats_screen.overall_score,
        analysis.content_audit.word_count
    );

    let report = ResumeAnalysisReport {
        analysis_id: Uuid::new_v4().to_string(),
        user_id,
        analysis_type: analysis_type.to_string(),
        filename,
        generated_at: now,
        analysis,
        ats_screen,
        improvement_plan,
    };

    state
        .store
        .put(RecordClass::Analysis, &report.analysis_id, &report)
        .await?;

    Ok(report)
}

/// POST /api/v1/resume/optimize
///
/// Runs the full optimization: rewrite the resume for the job, draft a cover
/// letter, generate application insights, screen the rewrite against the job
/// description, then persist and archive the combined report.
pub async fn optimize_for_job(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizationReport>, AppError> {
    require_non_empty(&request.profile.user_id, "user_id")?;
    require_non_empty(&request.job_description, "job_description")?;
    require_non_empty(&request.job_title, "job_title")?;
    require_non_empty(&request.company_name, "company_name")?;
    let resume_text = validated_resume_text(&request.resume_text)?;

    let now = Utc::now();
    let user_id = request.profile.user_id.clone();

    let optimized_resume = optimize_resume(
        &state.llm,
        &resume_text,
        &request.job_description,
        &request.job_title,
        &request.company_name,
    )
    .await;
    let cover_letter = generate_cover_letter(
        &state.llm,
        &request.profile,
        &request.job_description,
        &request.job_title,
        &request.company_name,
        now,
    )
    .await;
    let application_insights = generate_application_insights(
        &state.llm,
        &request.profile,
        optimized_resume.match_score,
        &request.job_description,
    )
    .await;

    let ats_screen = screen_resume(
        &optimized_resume.rendered_text(),
        Some(&request.job_description),
    );

    let optimization_id = optimization_id(now, &user_id);

    info!(
        "Resume optimization {} for user {}: match {}, ats {}",
        optimization_id, user_id, optimized_resume.match_score, ats_screen.overall_score
    );

    let mut report = OptimizationReport {
        optimization_id,
        user_id,
        generated_at: now,
        job_title: request.job_title,
        company_name: request.company_name,
        optimized_resume,
        cover_letter,
        ats_screen,
        application_insights,
        archive_key: None,
    };

    // Archiving is auxiliary: the record store below is the durable copy.
    match state
        .archive
        .store_optimization(&report.user_id, &report.optimization_id, &report)
        .await
    {
        Ok(key) => report.archive_key = Some(key),
        Err(err) => warn!(
            "Failed to archive optimization {}: {err}",
            report.optimization_id
        ),
    }

    state
        .store
        .put(RecordClass::Optimization, &report.optimization_id, &report)
        .await?;

    Ok(Json(report))
}

fn optimization_id(now: DateTime<Utc>, user_id: &str) -> String {
    format!("optimization_{}_{}", now.timestamp(), user_id)
}

fn require_non_empty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn validated_resume_text(text: &str) -> Result<String, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("resume text is required".to_string()));
    }
    if text.chars().count() > MAX_RESUME_CHARS {
        return Err(AppError::Validation(format!(
            "resume text exceeds {MAX_RESUME_CHARS} characters"
        )));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("u-1", "user_id").is_ok());
        assert!(require_non_empty("", "user_id").is_err());
        assert!(require_non_empty("   ", "user_id").is_err());
    }

    #[test]
    fn test_validated_resume_text_trims() {
        let text = validated_resume_text("  body  ").unwrap();
        assert_eq!(text, "body");
    }

    #[test]
    fn test_validated_resume_text_rejects_oversize() {
        let oversized = "x".repeat(MAX_RESUME_CHARS + 1);
        assert!(validated_resume_text(&oversized).is_err());
    }

    #[test]
    fn test_optimization_id_format() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let id = optimization_id(now, "u-1");
        assert_eq!(id, format!("optimization_{}_u-1", now.timestamp()));
    }

    #[test]
    fn test_analyze_request_filename_defaults_to_none() {
        let request: ResumeAnalyzeRequest =
            serde_json::from_str(r#"{"user_id": "u-1", "resume_text": "body"}"#).unwrap();
        assert!(request.filename.is_none());
    }

    #[test]
    fn test_optimize_request_deserializes() {
        let request: OptimizeRequest = serde_json::from_str(
            r#"{
                "profile": {"user_id": "u-1"},
                "resume_text": "body",
                "job_description": "build things",
                "job_title": "Engineer",
                "company_name": "Acme"
            }"#,
        )
        .unwrap();
        assert_eq!(request.profile.user_id, "u-1");
        assert_eq!(request.company_name, "Acme");
    }
}
