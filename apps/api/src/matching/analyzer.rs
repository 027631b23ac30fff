//! Per-listing match analysis.
//!
//! A [`JobMatcher`] produces a [`MatchReport`] for one listing. The AI-backed
//! matcher never surfaces an error to the search pipeline: any model, network,
//! or parsing failure degrades to the deterministic heuristics so a search
//! always completes with a report for every listing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::llm_client::prompts::{json_system, CAREER_ADVISOR_PERSONA};
use crate::llm_client::{parse_json_reply, salvage_score, LlmClient};
use crate::matching::prompts::build_match_prompt;
use crate::matching::scoring::{self, CultureFit, ProgressionFit, SalaryFit};
use crate::models::job::JobListing;
use crate::models::profile::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_score: u8,
    pub match_reasons: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub growth_potential: String,
    pub recommendations: Vec<String>,
    /// Set when the AI path failed and a fallback produced this report.
    #[serde(default)]
    pub degraded: bool,
}

/// Raw shape of the model's match reply, before sanitization. Every field is
/// optional so a partially conforming reply still yields a usable report.
#[derive(Debug, Deserialize)]
struct RawMatchReply {
    score: Option<i64>,
    #[serde(default)]
    reasons: Vec<String>,
    #[serde(default)]
    skill_gaps: Vec<String>,
    growth_potential: Option<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

impl RawMatchReply {
    fn sanitize(self) -> MatchReport {
        MatchReport {
            match_score: self.score.unwrap_or(50).clamp(0, 100) as u8,
            match_reasons: non_empty_or(self.reasons, "AI analysis unavailable"),
            skill_gaps: self.skill_gaps,
            growth_potential: self
                .growth_potential
                .unwrap_or_else(|| "Assessment unavailable".to_string()),
            recommendations: non_empty_or(self.recommendations, "Review job requirements carefully"),
            degraded: false,
        }
    }
}

fn non_empty_or(items: Vec<String>, fallback: &str) -> Vec<String> {
    if items.is_empty() {
        vec![fallback.to_string()]
    } else {
        items
    }
}

#[async_trait]
pub trait JobMatcher: Send + Sync {
    async fn analyze(&self, job: &JobListing, profile: &UserProfile) -> MatchReport;
}

/// Deterministic matcher built entirely on the scoring heuristics. Used when
/// AI matching is disabled and as the terminal fallback for the AI matcher.
pub struct HeuristicMatcher;

#[async_trait]
impl JobMatcher for HeuristicMatcher {
    async fn analyze(&self, job: &JobListing, profile: &UserProfile) -> MatchReport {
        heuristic_report(job, profile)
    }
}

fn heuristic_report(job: &JobListing, profile: &UserProfile) -> MatchReport {
    let basic = scoring::basic_match_score(job, profile);
    MatchReport {
        match_score: basic.score,
        match_reasons: basic.reasons,
        skill_gaps: vec!["Manual review recommended".to_string()],
        growth_potential: "Requires detailed analysis".to_string(),
        recommendations: vec!["Review job requirements and company details".to_string()],
        degraded: false,
    }
}

/// Matcher backed by the model. Parsing recovery runs in two stages: a strict
/// deserialize of the reply, then a score salvage over the raw text. Only
/// when both fail does the report fall back to fixed placeholder fields.
pub struct LlmMatcher {
    llm: LlmClient,
}

impl LlmMatcher {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl JobMatcher for LlmMatcher {
    async fn analyze(&self, job: &JobListing, profile: &UserProfile) -> MatchReport {
        let prompt = build_match_prompt(job, profile);
        let system = json_system(CAREER_ADVISOR_PERSONA);

        let text = match self.llm.call(&prompt, &system).await {
            Ok(response) => match response.text().map(str::to_owned) {
                Some(text) => text,
                None => {
                    warn!("AI matching returned no text for job {}", job.id);
                    return unavailable_report();
                }
            },
            Err(err) => {
                warn!("AI matching failed for job {}: {err}", job.id);
                return unavailable_report();
            }
        };

        match parse_json_reply::<RawMatchReply>(&text) {
            Ok(raw) => raw.sanitize(),
            Err(err) => {
                warn!("AI match reply for job {} was not valid JSON: {err}", job.id);
                salvaged_report(&text)
            }
        }
    }
}

fn unavailable_report() -> MatchReport {
    MatchReport {
        match_score: 50,
        match_reasons: vec!["AI analysis temporarily unavailable".to_string()],
        skill_gaps: vec!["Unable to assess".to_string()],
        growth_potential: "Assessment unavailable".to_string(),
        recommendations: vec!["Review job description manually".to_string()],
        degraded: true,
    }
}

fn salvaged_report(text: &str) -> MatchReport {
    MatchReport {
        match_score: salvage_score(text).unwrap_or(50),
        match_reasons: vec!["Basic compatibility assessment".to_string()],
        skill_gaps: vec!["Manual review recommended".to_string()],
        growth_potential: "Requires further analysis".to_string(),
        recommendations: vec!["Research company and role thoroughly".to_string()],
        degraded: true,
    }
}

pub fn build_matcher(config: &Config, llm: &LlmClient) -> Arc<dyn JobMatcher> {
    if config.enable_llm_matching {
        Arc::new(LlmMatcher::new(llm.clone()))
    } else {
        Arc::new(HeuristicMatcher)
    }
}

/// One listing with its full analysis attached, as stored in search records
/// and returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredListing {
    pub job: JobListing,
    pub analysis: MatchReport,
    pub salary_analysis: SalaryFit,
    pub culture_fit: CultureFit,
    pub career_progression: ProgressionFit,
    pub urgency_score: u8,
    pub competitiveness_score: u8,
}

/// Analyzes every listing and sorts the batch best-first. Ties on match
/// score break by salary ceiling, then by remote friendliness.
pub async fn score_listings(
    matcher: &dyn JobMatcher,
    listings: Vec<JobListing>,
    profile: &UserProfile,
    now: DateTime<Utc>,
) -> Vec<ScoredListing> {
    let mut scored = Vec::with_capacity(listings.len());

    for job in listings {
        let analysis = matcher.analyze(&job, profile).await;
        let salary_analysis = scoring::analyze_salary_fit(&job, profile.salary_expectation);
        let culture_fit = scoring::analyze_culture_fit(&job, profile);
        let career_progression = scoring::analyze_progression(&job, profile.experience_level);
        let urgency_score = scoring::urgency_score(job.days_since_posted(now));
        let competitiveness_score = scoring::competitiveness_score(&job);

        scored.push(ScoredListing {
            job,
            analysis,
            salary_analysis,
            culture_fit,
            career_progression,
            urgency_score,
            competitiveness_score,
        });
    }

    scored.sort_by(|a, b| {
        (b.analysis.match_score, b.job.salary_max, b.job.remote_friendly).cmp(&(
            a.analysis.match_score,
            a.job.salary_max,
            a.job.remote_friendly,
        ))
    });

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{CompanyProfile, CompanySize, JobType};

    fn make_listing(id: &str) -> JobListing {
        JobListing {
            id: id.to_string(),
            title: "Mid Level Software Engineer".to_string(),
            company: "TechCorp".to_string(),
            company_profile: CompanyProfile {
                size: CompanySize::Large,
                industry: "Technology".to_string(),
                rating: 4.2,
            },
            salary_min: 80_000,
            salary_max: 120_000,
            location: "Austin, TX".to_string(),
            tech_stack: vec!["Python".to_string()],
            description: "Ship features".to_string(),
            posted_at: Utc::now(),
            source: "indeed".to_string(),
            job_type: JobType::FullTime,
            remote_friendly: false,
            visa_sponsorship: false,
            equity_offered: false,
            benefits: vec![],
        }
    }

    fn make_profile() -> UserProfile {
        serde_json::from_str(
            r#"{
                "user_id": "u-1",
                "target_role": "Software Engineer",
                "experience_level": "Mid",
                "skills": ["Python"],
                "salary_expectation": 95000,
                "location": "Austin, TX"
            }"#,
        )
        .expect("profile should deserialize")
    }

    #[tokio::test]
    async fn test_heuristic_matcher_reports_basic_score() {
        let report = HeuristicMatcher.analyze(&make_listing("j1"), &make_profile()).await;
        // +30 role, +25 salary, +20 location, +15 level, +3 one skill
        assert_eq!(report.match_score, 93);
        assert!(!report.degraded);
        assert_eq!(report.skill_gaps, vec!["Manual review recommended".to_string()]);
    }

    #[test]
    fn test_sanitize_clamps_score_and_fills_defaults() {
        let raw = RawMatchReply {
            score: Some(140),
            reasons: vec![],
            skill_gaps: vec!["Kubernetes".to_string()],
            growth_potential: None,
            recommendations: vec![],
        };
        let report = raw.sanitize();
        assert_eq!(report.match_score, 100);
        assert_eq!(report.match_reasons, vec!["AI analysis unavailable".to_string()]);
        assert_eq!(report.growth_potential, "Assessment unavailable");
        assert_eq!(
            report.recommendations,
            vec!["Review job requirements carefully".to_string()]
        );
        assert!(!report.degraded);
    }

    #[test]
    fn test_sanitize_defaults_missing_score_to_midpoint() {
        let raw = RawMatchReply {
            score: None,
            reasons: vec!["Strong stack overlap".to_string()],
            skill_gaps: vec![],
            growth_potential: Some("Good trajectory".to_string()),
            recommendations: vec!["Apply".to_string()],
        };
        assert_eq!(raw.sanitize().match_score, 50);
    }

    #[test]
    fn test_salvaged_report_pulls_score_from_broken_reply() {
        let report = salvaged_report("The score: 78 overall, but I could not format JSON");
        assert_eq!(report.match_score, 78);
        assert!(report.degraded);
        assert_eq!(report.match_reasons, vec!["Basic compatibility assessment".to_string()]);
    }

    #[test]
    fn test_salvaged_report_defaults_to_midpoint() {
        let report = salvaged_report("no usable digits here");
        assert_eq!(report.match_score, 50);
    }

    #[tokio::test]
    async fn test_score_listings_sorts_best_first() {
        let profile = make_profile();
        let strong = make_listing("strong");
        let mut weak = make_listing("weak");
        weak.title = "Accountant".to_string();
        weak.salary_min = 40_000;
        weak.salary_max = 55_000;
        weak.location = "Reykjavik".to_string();
        weak.tech_stack = vec!["Excel".to_string()];

        let scored =
            score_listings(&HeuristicMatcher, vec![weak, strong], &profile, Utc::now()).await;
        assert_eq!(scored[0].job.id, "strong");
        assert_eq!(scored[1].job.id, "weak");
        assert!(scored[0].analysis.match_score > scored[1].analysis.match_score);
    }

    #[tokio::test]
    async fn test_score_listings_breaks_ties_by_salary_then_remote() {
        let profile = make_profile();
        let low = make_listing("low-ceiling");
        let mut high = make_listing("high-ceiling");
        high.salary_max = 130_000;

        let scored =
            score_listings(&HeuristicMatcher, vec![low, high], &profile, Utc::now()).await;
        assert_eq!(scored[0].analysis.match_score, scored[1].analysis.match_score);
        assert_eq!(scored[0].job.id, "high-ceiling");

        let plain = make_listing("on-site");
        let mut remote = make_listing("remote-ok");
        remote.remote_friendly = true;
        let scored =
            score_listings(&HeuristicMatcher, vec![plain, remote], &profile, Utc::now()).await;
        assert_eq!(scored[0].job.id, "remote-ok");
    }

    #[tokio::test]
    async fn test_score_listings_attaches_every_heuristic() {
        let scored = score_listings(
            &HeuristicMatcher,
            vec![make_listing("j1")],
            &make_profile(),
            Utc::now(),
        )
        .await;
        let entry = &scored[0];
        assert!(entry.culture_fit.score >= 70);
        assert!(entry.career_progression.score >= 60);
        assert_eq!(entry.urgency_score, 90);
        assert!(entry.competitiveness_score >= 50);
    }
}
