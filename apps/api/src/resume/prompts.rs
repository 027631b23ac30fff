//! Prompt templates and builders for the resume analysis and optimization
//! calls. Document inserts are bounded so oversized uploads cannot blow out
//! the prompt.

use chrono::{DateTime, Utc};

use crate::matching::prompts::profile_summary;
use crate::models::profile::UserProfile;
use crate::resume::analysis::ResumeAnalysis;

/// Persona for every resume-facing call.
pub const RESUME_COACH_PERSONA: &str = "You are an expert resume writer and \
    applicant-tracking-system specialist. \
    Ground every observation in the resume text provided. \
    Never invent employers, dates, or credentials.";

pub const ANALYZE_PROMPT_TEMPLATE: &str = r#"Analyze this resume and assess its quality and ATS readiness:

RESUME:
{resume}

Provide the assessment in the following JSON format:
{
    "overall_score": <0-100 integer>,
    "ats_compatibility": <0-100 integer>,
    "strengths": [<3-5 specific strengths of this resume>],
    "weaknesses": [<3-5 specific weaknesses to address>],
    "missing_keywords": [<keywords and skills the resume should mention>],
    "suggested_improvements": [<specific, actionable improvements ordered by impact>]
}

Respond with ONLY the JSON object, no additional text."#;

pub const IMPROVEMENTS_PROMPT_TEMPLATE: &str = r#"Based on this resume analysis, provide specific improvement suggestions:

CURRENT ANALYSIS:
- Overall Score: {score}
- Strengths: {strengths}
- Weaknesses: {weaknesses}
- ATS Score: {ats_score}

RESUME (excerpt):
{resume}

Provide improvement suggestions in the following JSON format:
{
    "immediate_fixes": [<quick fixes that can be implemented right away>],
    "content_improvements": [<content-related improvements>],
    "formatting_suggestions": [<formatting and structure improvements>],
    "ats_optimizations": [<ATS-specific improvements>],
    "skill_enhancements": [<ways to better showcase skills>],
    "achievement_improvements": [<ways to better quantify and present achievements>],
    "priority_order": [<improvements ordered by priority>],
    "estimated_impact": {
        "score_improvement": "<estimated points improvement>",
        "ats_improvement": "<estimated ATS score improvement>",
        "overall_effectiveness": "<assessment of overall improvement potential>"
    }
}

Respond with ONLY the JSON object, no additional text."#;

pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Optimize the following resume for this specific job application:

JOB DETAILS:
- Title: {job_title}
- Company: {company}
- Description: {job_description}

CURRENT RESUME:
{resume}

Provide the optimized resume in the following JSON format:
{
    "optimized_sections": {
        "professional_summary": "<tailored 3-4 sentence summary>",
        "key_skills": [<relevant skills to highlight>],
        "work_experience": [
            {
                "position": "<job title>",
                "company": "<company name>",
                "duration": "<time period>",
                "achievements": [<tailored, quantified achievements>]
            }
        ],
        "education": [<relevant education entries>],
        "additional_sections": {
            "certifications": [<relevant certifications>],
            "projects": [<relevant projects>],
            "technical_skills": [<categorized technical skills>]
        }
    },
    "optimization_notes": {
        "keywords_added": [<job-relevant keywords incorporated>],
        "achievements_enhanced": [<achievements that were improved>],
        "skills_prioritized": [<skills moved to prominence>],
        "content_tailored": [<content specifically tailored for this role>]
    },
    "ats_optimization": {
        "keyword_density": "<assessment>",
        "format_compatibility": "<assessment>",
        "section_organization": "<assessment>"
    },
    "match_score": <0-100 integer for how well the optimized resume matches the job>
}

Incorporate job-specific keywords naturally, quantify accomplishments with metrics, and tailor the professional summary to the role.

Respond with ONLY the JSON object, no additional text."#;

pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Generate a professional, tailored cover letter for this job application:

CANDIDATE PROFILE:
{candidate}

JOB DETAILS:
- Position: {job_title}
- Company: {company}
- Date: {date}
- Description: {job_description}

Provide the cover letter in the following JSON format:
{
    "header": {
        "date": "<current date>",
        "recipient": "<hiring manager address>",
        "subject": "<subject line>"
    },
    "opening_paragraph": "<engaging opening that mentions the specific role and company>",
    "body_paragraphs": [
        "<paragraph highlighting relevant experience and achievements>",
        "<paragraph demonstrating knowledge of the company and role fit>",
        "<paragraph showcasing specific skills and value proposition>"
    ],
    "closing_paragraph": "<professional closing with a call to action>",
    "signature": "<professional signature>",
    "key_points": [<key selling points emphasized>],
    "personalization_elements": [<company-specific elements included>]
}

Avoid generic language and focus on the specific value the candidate brings.

Respond with ONLY the JSON object, no additional text."#;

pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"Provide comprehensive application insights for this job opportunity:

CANDIDATE PROFILE:
{candidate}

OPTIMIZED RESUME MATCH SCORE: {match_score}

JOB DESCRIPTION:
{job_description}

Provide insights in the following JSON format:
{
    "application_strategy": {
        "timing_recommendation": "<best time to apply>",
        "application_priority": "<High/Medium/Low>",
        "success_probability": "<percentage estimate>",
        "competitive_advantage": [<the candidate's key advantages>]
    },
    "interview_preparation": {
        "likely_questions": [<5 probable interview questions>],
        "technical_topics": [<technical areas to review>],
        "behavioral_scenarios": [<behavioral questions to prepare>],
        "company_research_points": [<company aspects to research>]
    },
    "skill_development": {
        "immediate_improvements": [<skills to develop before applying>],
        "long_term_growth": [<skills for career advancement>],
        "learning_resources": [<specific resources or courses to consider>]
    },
    "negotiation_insights": {
        "salary_range_estimate": "<estimated range for this role>",
        "negotiation_leverage": [<factors that strengthen the negotiation position>],
        "benefits_to_consider": [<non-salary benefits to negotiate>]
    },
    "application_checklist": [<items to complete before applying>]
}

Respond with ONLY the JSON object, no additional text."#;

pub fn build_analyze_prompt(resume_text: &str) -> String {
    ANALYZE_PROMPT_TEMPLATE.replace("{resume}", &clipped(resume_text, 3000))
}

pub fn build_improvements_prompt(resume_text: &str, analysis: &ResumeAnalysis) -> String {
    IMPROVEMENTS_PROMPT_TEMPLATE
        .replace("{score}", &analysis.overall_score.to_string())
        .replace("{strengths}", &analysis.strengths.join("; "))
        .replace("{weaknesses}", &analysis.weaknesses.join("; "))
        .replace("{ats_score}", &analysis.ats_compatibility.to_string())
        .replace("{resume}", &clipped(resume_text, 1000))
}

pub fn build_optimize_prompt(
    resume_text: &str,
    job_description: &str,
    job_title: &str,
    company_name: &str,
) -> String {
    OPTIMIZE_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{company}", company_name)
        .replace("{job_description}", &clipped(job_description, 2000))
        .replace("{resume}", &clipped(resume_text, 2500))
}

pub fn build_cover_letter_prompt(
    profile: &UserProfile,
    job_description: &str,
    job_title: &str,
    company_name: &str,
    now: DateTime<Utc>,
) -> String {
    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{candidate}", &profile_summary(profile))
        .replace("{job_title}", job_title)
        .replace("{company}", company_name)
        .replace("{date}", &now.format("%B %d, %Y").to_string())
        .replace("{job_description}", &clipped(job_description, 1500))
}

pub fn build_insights_prompt(
    profile: &UserProfile,
    match_score: u8,
    job_description: &str,
) -> String {
    INSIGHTS_PROMPT_TEMPLATE
        .replace("{candidate}", &profile_summary(profile))
        .replace("{match_score}", &match_score.to_string())
        .replace("{job_description}", &clipped(job_description, 1500))
}

fn clipped(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
