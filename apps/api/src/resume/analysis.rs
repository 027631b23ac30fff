//! AI-assisted resume analysis.
//!
//! The analysis call never surfaces an error: any model, network, or parsing
//! failure degrades to a fixed report built around the deterministic ATS
//! screen and content audit, so the caller always gets a complete response.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::json_system;
use crate::llm_client::{parse_json_reply, LlmClient};
use crate::resume::ats::{screen_resume, AtsReport};
use crate::resume::audit::{audit_content, ContentAudit};
use crate::resume::prompts::{
    build_analyze_prompt, build_improvements_prompt, RESUME_COACH_PERSONA,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub overall_score: u8,
    pub ats_compatibility: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggested_improvements: Vec<String>,
    /// Always computed deterministically, regardless of how the AI path went.
    pub content_audit: ContentAudit,
    /// Set when the AI path failed and a fallback produced this report.
    #[serde(default)]
    pub degraded: bool,
}

/// Raw shape of the model's analysis reply, before sanitization. Every field
/// is optional so a partially conforming reply still yields a usable report.
#[derive(Debug, Deserialize)]
struct RawAnalysisReply {
    overall_score: Option<i64>,
    ats_compatibility: Option<i64>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    missing_keywords: Vec<String>,
    #[serde(default)]
    suggested_improvements: Vec<String>,
}

impl RawAnalysisReply {
    fn sanitize(self, audit: ContentAudit, deterministic_ats: u8) -> ResumeAnalysis {
        ResumeAnalysis {
            overall_score: self.overall_score.unwrap_or(60).clamp(0, 100) as u8,
            ats_compatibility: self
                .ats_compatibility
                .map(|score| score.clamp(0, 100) as u8)
                .unwrap_or(deterministic_ats),
            strengths: non_empty_or(self.strengths, "Content detected"),
            weaknesses: self.weaknesses,
            missing_keywords: self.missing_keywords,
            suggested_improvements: non_empty_or(
                self.suggested_improvements,
                "Get a professional resume review",
            ),
            content_audit: audit,
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

/// Runs the model analysis and merges in the deterministic audit. Falls back
/// to a heuristic report when the model path fails.
pub async fn analyze_resume(llm: &LlmClient, resume_text: &str) -> ResumeAnalysis {
    let audit = audit_content(resume_text);
    let screen = screen_resume(resume_text, None);

    let prompt = build_analyze_prompt(resume_text);
    let system = json_system(RESUME_COACH_PERSONA);

    match llm.call(&prompt, &system).await {
        Ok(response) => {
            let Some(text) = response.text() else {
                warn!("Resume analysis returned no text content");
                return fallback_analysis(audit, screen);
            };
            match parse_json_reply::<RawAnalysisReply>(text) {
                Ok(raw) => raw.sanitize(audit, screen.overall_score),
                Err(err) => {
                    warn!("Resume analysis reply failed to parse: {}", err);
                    fallback_analysis(audit, screen)
                }
            }
        }
        Err(err) => {
            warn!("Resume analysis call failed: {}", err);
            fallback_analysis(audit, screen)
        }
    }
}

fn fallback_analysis(audit: ContentAudit, screen: AtsReport) -> ResumeAnalysis {
    ResumeAnalysis {
        overall_score: 60,
        ats_compatibility: screen.overall_score,
        strengths: vec![
            "Resume uploaded successfully".to_string(),
            "Content detected".to_string(),
        ],
        weaknesses: vec![
            "AI analysis unavailable".to_string(),
            "Manual review recommended".to_string(),
        ],
        missing_keywords: screen.missing_keywords.into_iter().take(10).collect(),
        suggested_improvements: screen.recommendations,
        content_audit: audit,
        degraded: true,
    }
}

/// Targeted improvement plan generated from an existing analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementPlan {
    #[serde(default)]
    pub immediate_fixes: Vec<String>,
    #[serde(default)]
    pub content_improvements: Vec<String>,
    #[serde(default)]
    pub formatting_suggestions: Vec<String>,
    #[serde(default)]
    pub ats_optimizations: Vec<String>,
    #[serde(default)]
    pub skill_enhancements: Vec<String>,
    #[serde(default)]
    pub achievement_improvements: Vec<String>,
    #[serde(default)]
    pub priority_order: Vec<String>,
    #[serde(default)]
    pub estimated_impact: EstimatedImpact,
    #[serde(default)]
    pub degraded: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimatedImpact {
    #[serde(default)]
    pub score_improvement: String,
    #[serde(default)]
    pub ats_improvement: String,
    #[serde(default)]
    pub overall_effectiveness: String,
}

/// Asks the model for a prioritized improvement plan. Falls back to general
/// best-practice guidance when the model path fails.
pub async fn suggest_improvements(
    llm: &LlmClient,
    resume_text: &str,
    analysis: &ResumeAnalysis,
) -> ImprovementPlan {
    let prompt = build_improvements_prompt(resume_text, analysis);
    let system = json_system(RESUME_COACH_PERSONA);

    match llm.call_json::<ImprovementPlan>(&prompt, &system).await {
        Ok(plan) => plan,
        Err(err) => {
            warn!("Improvement suggestions failed: {}", err);
            fallback_improvement_plan()
        }
    }
}

fn fallback_improvement_plan() -> ImprovementPlan {
    ImprovementPlan {
        immediate_fixes: to_strings(&[
            "Ensure contact information is complete and professional",
            "Use consistent formatting throughout",
            "Check for spelling and grammar errors",
            "Use standard section headings",
        ]),
        content_improvements: to_strings(&[
            "Add quantified achievements with specific metrics",
            "Include relevant keywords from target job descriptions",
            "Strengthen professional summary",
            "Highlight most relevant experience first",
        ]),
        formatting_suggestions: to_strings(&[
            "Use a clean, professional font",
            "Maintain consistent spacing and margins",
            "Use bullet points for easy scanning",
            "Keep to 1-2 pages maximum",
        ]),
        ats_optimizations: to_strings(&[
            "Include keywords from job descriptions",
            "Use standard section headings",
            "Avoid graphics, tables, and complex formatting",
            "Save in both PDF and Word formats",
        ]),
        skill_enhancements: to_strings(&[
            "Organize skills by category",
            "Include proficiency levels where appropriate",
            "Add relevant certifications and training",
            "Showcase skills through specific examples",
        ]),
        achievement_improvements: to_strings(&[
            "Use action verbs to start bullet points",
            "Include specific numbers, percentages, and metrics",
            "Focus on results and impact, not just responsibilities",
            "Use the STAR method for complex achievements",
        ]),
        priority_order: to_strings(&[
            "Fix formatting and consistency issues",
            "Add quantified achievements",
            "Optimize for ATS compatibility",
            "Strengthen professional summary",
            "Enhance skills section",
        ]),
        estimated_impact: EstimatedImpact {
            score_improvement: "10-20 points".to_string(),
            ats_improvement: "15-25 points".to_string(),
            overall_effectiveness: "Moderate to significant improvement expected".to_string(),
        },
        degraded: true,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "\
jane@example.com 555-123-4567

Experience
- Cut infra spend by 30%

Education
B.S. Computer Science

Skills
Rust, Python";

    #[test]
    fn test_sanitize_clamps_scores() {
        let raw = RawAnalysisReply {
            overall_score: Some(250),
            ats_compatibility: Some(-5),
            strengths: vec!["Strong skills section".to_string()],
            weaknesses: vec![],
            missing_keywords: vec![],
            suggested_improvements: vec![],
        };
        let analysis = raw.sanitize(audit_content(SAMPLE_RESUME), 55);
        assert_eq!(analysis.overall_score, 100);
        assert_eq!(analysis.ats_compatibility, 0);
        assert!(!analysis.degraded);
    }

    #[test]
    fn test_sanitize_fills_missing_fields() {
        let raw = RawAnalysisReply {
            overall_score: None,
            ats_compatibility: None,
            strengths: vec![],
            weaknesses: vec![],
            missing_keywords: vec![],
            suggested_improvements: vec![],
        };
        let analysis = raw.sanitize(audit_content(SAMPLE_RESUME), 55);
        assert_eq!(analysis.overall_score, 60);
        assert_eq!(analysis.ats_compatibility, 55);
        assert_eq!(analysis.strengths, vec!["Content detected"]);
        assert_eq!(
            analysis.suggested_improvements,
            vec!["Get a professional resume review"]
        );
    }

    #[test]
    fn test_fallback_analysis_uses_deterministic_screen() {
        let audit = audit_content(SAMPLE_RESUME);
        let screen = screen_resume(SAMPLE_RESUME, None);
        let expected_ats = screen.overall_score;

        let analysis = fallback_analysis(audit, screen);
        assert!(analysis.degraded);
        assert_eq!(analysis.overall_score, 60);
        assert_eq!(analysis.ats_compatibility, expected_ats);
        assert!(analysis.content_audit.email_found);
        assert!(analysis.missing_keywords.len() <= 10);
    }

    #[test]
    fn test_fallback_plan_is_complete() {
        let plan = fallback_improvement_plan();
        assert!(plan.degraded);
        assert_eq!(plan.immediate_fixes.len(), 4);
        assert_eq!(plan.priority_order.len(), 5);
        assert_eq!(plan.estimated_impact.score_improvement, "10-20 points");
    }

    #[test]
    fn test_improvement_plan_parses_partial_reply() {
        let plan: ImprovementPlan =
            serde_json::from_str(r#"{"immediate_fixes": ["Fix typos"]}"#).unwrap();
        assert_eq!(plan.immediate_fixes, vec!["Fix typos"]);
        assert!(plan.priority_order.is_empty());
        assert!(!plan.degraded);
    }
}
