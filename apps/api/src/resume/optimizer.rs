//! Job-targeted resume optimization.
//!
//! Three model calls make up an optimization: the resume rewrite, the cover
//! letter, and the application insights. Each call degrades independently to
//! its own fixed fallback, so a single model failure never loses the other
//! artifacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;
use crate::models::profile::UserProfile;
use crate::resume::prompts::{
    build_cover_letter_prompt, build_insights_prompt, build_optimize_prompt, RESUME_COACH_PERSONA,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedResume {
    pub optimized_sections: OptimizedSections,
    pub optimization_notes: OptimizationNotes,
    pub ats_optimization: AtsAssessment,
    pub match_score: u8,
    /// Source text passed through unchanged, set when the rewrite fell back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default)]
    pub degraded: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizedSections {
    #[serde(default)]
    pub professional_summary: String,
    #[serde(default)]
    pub key_skills: Vec<String>,
    #[serde(default)]
    pub work_experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub additional_sections: AdditionalSections,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdditionalSections {
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub technical_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizationNotes {
    #[serde(default)]
    pub keywords_added: Vec<String>,
    #[serde(default)]
    pub achievements_enhanced: Vec<String>,
    #[serde(default)]
    pub skills_prioritized: Vec<String>,
    #[serde(default)]
    pub content_tailored: Vec<String>,
}

/// Model's own take on how ATS-friendly the rewrite is. The deterministic
/// screen elsewhere in the report is the authoritative number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtsAssessment {
    #[serde(default)]
    pub keyword_density: String,
    #[serde(default)]
    pub format_compatibility: String,
    #[serde(default)]
    pub section_organization: String,
}

#[derive(Debug, Deserialize)]
struct RawOptimizeReply {
    optimized_sections: Option<OptimizedSections>,
    #[serde(default)]
    optimization_notes: OptimizationNotes,
    #[serde(default)]
    ats_optimization: AtsAssessment,
    match_score: Option<i64>,
}

impl RawOptimizeReply {
    /// A rewrite without sections is useless, so that case is `None` and the
    /// caller falls back.
    fn sanitize(self) -> Option<OptimizedResume> {
        let sections = self.optimized_sections?;
        Some(OptimizedResume {
            optimized_sections: sections,
            optimization_notes: self.optimization_notes,
            ats_optimization: self.ats_optimization,
            match_score: self.match_score.unwrap_or(50).clamp(0, 100) as u8,
            original_text: None,
            degraded: false,
        })
    }
}

impl OptimizedResume {
    /// Flattens the rewrite back into plain text, with section headings, for
    /// downstream screening. The fallback variant returns the source text.
    pub fn rendered_text(&self) -> String {
        if let Some(original) = &self.original_text {
            return original.clone();
        }

        let sections = &self.optimized_sections;
        let mut out = String::new();

        push_section(&mut out, "Professional Summary", &sections.professional_summary);
        push_list_section(&mut out, "Skills", &sections.key_skills);

        if !sections.work_experience.is_empty() {
            out.push_str("Experience\n");
            for entry in &sections.work_experience {
                out.push_str(&format!(
                    "{} at {} ({})\n",
                    entry.position, entry.company, entry.duration
                ));
                for achievement in &entry.achievements {
                    out.push_str(&format!("- {achievement}\n"));
                }
            }
            out.push('\n');
        }

        push_list_section(&mut out, "Education", &sections.education);
        push_list_section(
            &mut out,
            "Certifications",
            &sections.additional_sections.certifications,
        );
        push_list_section(&mut out, "Projects", &sections.additional_sections.projects);
        push_list_section(
            &mut out,
            "Technical Skills",
            &sections.additional_sections.technical_skills,
        );

        out.trim_end().to_string()
    }
}

fn push_section(out: &mut String, heading: &str, body: &str) {
    if !body.is_empty() {
        out.push_str(heading);
        out.push('\n');
        out.push_str(body);
        out.push_str("\n\n");
    }
}

fn push_list_section(out: &mut String, heading: &str, items: &[String]) {
    if !items.is_empty() {
        out.push_str(heading);
        out.push('\n');
        out.push_str(&items.join(", "));
        out.push_str("\n\n");
    }
}

/// Rewrites the resume for the target job. Falls back to the unmodified
/// source text with fixed notes when the model path fails.
pub async fn optimize_resume(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
    job_title: &str,
    company_name: &str,
) -> OptimizedResume {
    let prompt = build_optimize_prompt(resume_text, job_description, job_title, company_name);
    let system = json_system(RESUME_COACH_PERSONA);

    match llm.call_json::<RawOptimizeReply>(&prompt, &system).await {
        Ok(raw) => match raw.sanitize() {
            Some(optimized) => optimized,
            None => {
                warn!("Rewrite reply had no optimized sections, using fallback");
                fallback_optimization(resume_text, job_title, company_name)
            }
        },
        Err(err) => {
            warn!("Resume rewrite failed: {}", err);
            fallback_optimization(resume_text, job_title, company_name)
        }
    }
}

fn fallback_optimization(resume_text: &str, job_title: &str, company_name: &str) -> OptimizedResume {
    OptimizedResume {
        optimized_sections: OptimizedSections {
            professional_summary: format!(
                "Experienced professional seeking {job_title} position at {company_name}"
            ),
            key_skills: vec![
                "Communication".to_string(),
                "Problem Solving".to_string(),
                "Teamwork".to_string(),
            ],
            work_experience: Vec::new(),
            education: Vec::new(),
            additional_sections: AdditionalSections::default(),
        },
        optimization_notes: OptimizationNotes {
            keywords_added: vec!["Manual keyword optimization recommended".to_string()],
            achievements_enhanced: vec!["Manual enhancement recommended".to_string()],
            skills_prioritized: vec!["Manual prioritization recommended".to_string()],
            content_tailored: vec!["Manual tailoring recommended".to_string()],
        },
        ats_optimization: AtsAssessment {
            keyword_density: "Manual review needed".to_string(),
            format_compatibility: "Manual review needed".to_string(),
            section_organization: "Manual review needed".to_string(),
        },
        match_score: 50,
        original_text: Some(resume_text.to_string()),
        degraded: true,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetter {
    pub header: LetterHeader,
    pub opening_paragraph: String,
    pub body_paragraphs: Vec<String>,
    pub closing_paragraph: String,
    pub signature: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub personalization_elements: Vec<String>,
    #[serde(default)]
    pub degraded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterHeader {
    pub date: String,
    pub recipient: String,
    pub subject: String,
}

/// Drafts a tailored cover letter. Falls back to the fixed template with the
/// company and title interpolated when the model path fails.
pub async fn generate_cover_letter(
    llm: &LlmClient,
    profile: &UserProfile,
    job_description: &str,
    job_title: &str,
    company_name: &str,
    now: DateTime<Utc>,
) -> CoverLetter {
    let prompt = build_cover_letter_prompt(profile, job_description, job_title, company_name, now);
    let system = json_system(RESUME_COACH_PERSONA);

    match llm.call_json::<CoverLetter>(&prompt, &system).await {
        Ok(letter) => letter,
        Err(err) => {
            warn!("Cover letter generation failed: {}", err);
            fallback_cover_letter(profile, job_title, company_name, now)
        }
    }
}

fn fallback_cover_letter(
    profile: &UserProfile,
    job_title: &str,
    company_name: &str,
    now: DateTime<Utc>,
) -> CoverLetter {
    let candidate_name = profile.name.as_deref().unwrap_or("Candidate");
    let skills = if profile.skills.is_empty() {
        "various technologies".to_string()
    } else {
        profile.skills.join(", ")
    };

    CoverLetter {
        header: LetterHeader {
            date: now.format("%B %d, %Y").to_string(),
            recipient: format!("{company_name} Hiring Team"),
            subject: format!("Application for {job_title} Position"),
        },
        opening_paragraph: format!(
            "Dear Hiring Manager, I am writing to express my interest in the {job_title} \
             position at {company_name}."
        ),
        body_paragraphs: vec![
            format!(
                "As a {} level professional, I am excited about the opportunity to contribute \
                 to your team.",
                profile.experience_level.as_str()
            ),
            format!("My background in {skills} aligns well with your requirements."),
            format!(
                "I am particularly drawn to {company_name} because of your reputation for \
                 innovation and excellence."
            ),
        ],
        closing_paragraph: "I would welcome the opportunity to discuss how my skills and \
                            enthusiasm can contribute to your team. Thank you for your \
                            consideration."
            .to_string(),
        signature: format!("Sincerely,\n{candidate_name}"),
        key_points: vec![
            "Relevant experience".to_string(),
            "Technical skills".to_string(),
            "Company interest".to_string(),
        ],
        personalization_elements: vec![
            format!("Company name: {company_name}"),
            format!("Position: {job_title}"),
        ],
        degraded: true,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationInsights {
    pub application_strategy: ApplicationStrategy,
    pub interview_preparation: InterviewPreparation,
    pub skill_development: SkillDevelopmentPlan,
    pub negotiation_insights: NegotiationInsights,
    #[serde(default)]
    pub application_checklist: Vec<String>,
    #[serde(default)]
    pub degraded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationStrategy {
    pub timing_recommendation: String,
    pub application_priority: String,
    pub success_probability: String,
    #[serde(default)]
    pub competitive_advantage: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewPreparation {
    #[serde(default)]
    pub likely_questions: Vec<String>,
    #[serde(default)]
    pub technical_topics: Vec<String>,
    #[serde(default)]
    pub behavioral_scenarios: Vec<String>,
    #[serde(default)]
    pub company_research_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDevelopmentPlan {
    #[serde(default)]
    pub immediate_improvements: Vec<String>,
    #[serde(default)]
    pub long_term_growth: Vec<String>,
    #[serde(default)]
    pub learning_resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationInsights {
    pub salary_range_estimate: String,
    #[serde(default)]
    pub negotiation_leverage: Vec<String>,
    #[serde(default)]
    pub benefits_to_consider: Vec<String>,
}

/// Generates interview-prep and application-strategy insights. Falls back to
/// the fixed guidance set when the model path fails.
pub async fn generate_application_insights(
    llm: &LlmClient,
    profile: &UserProfile,
    match_score: u8,
    job_description: &str,
) -> ApplicationInsights {
    let prompt = build_insights_prompt(profile, match_score, job_description);
    let system = json_system(RESUME_COACH_PERSONA);

    match llm.call_json::<ApplicationInsights>(&prompt, &system).await {
        Ok(insights) => insights,
        Err(err) => {
            warn!("Application insights generation failed: {}", err);
            fallback_insights()
        }
    }
}

fn fallback_insights() -> ApplicationInsights {
    ApplicationInsights {
        application_strategy: ApplicationStrategy {
            timing_recommendation: "Apply within 1-2 weeks of job posting".to_string(),
            application_priority: "Medium".to_string(),
            success_probability: "Requires detailed analysis".to_string(),
            competitive_advantage: vec!["Manual assessment needed".to_string()],
        },
        interview_preparation: InterviewPreparation {
            likely_questions: vec![
                "Tell me about yourself".to_string(),
                "Why are you interested in this role?".to_string(),
                "What are your greatest strengths?".to_string(),
                "Describe a challenging project you worked on".to_string(),
                "Where do you see yourself in 5 years?".to_string(),
            ],
            technical_topics: vec!["Manual assessment based on job requirements".to_string()],
            behavioral_scenarios: vec!["STAR method preparation recommended".to_string()],
            company_research_points: vec![
                "Company mission, values, recent news, culture".to_string()
            ],
        },
        skill_development: SkillDevelopmentPlan {
            immediate_improvements: vec![
                "Review job requirements for specific skills".to_string()
            ],
            long_term_growth: vec!["Industry trends and emerging technologies".to_string()],
            learning_resources: vec![
                "Online courses, certifications, practice projects".to_string()
            ],
        },
        negotiation_insights: NegotiationInsights {
            salary_range_estimate: "Research market rates for similar positions".to_string(),
            negotiation_leverage: vec![
                "Relevant experience".to_string(),
                "In-demand skills".to_string(),
                "Market conditions".to_string(),
            ],
            benefits_to_consider: vec![
                "Health insurance".to_string(),
                "PTO".to_string(),
                "Professional development".to_string(),
                "Remote work".to_string(),
            ],
        },
        application_checklist: vec![
            "Customize resume for this specific role".to_string(),
            "Write tailored cover letter".to_string(),
            "Research company thoroughly".to_string(),
            "Prepare portfolio or work samples".to_string(),
            "Practice interview questions".to_string(),
            "Prepare thoughtful questions to ask interviewer".to_string(),
        ],
        degraded: true,
    }
}
